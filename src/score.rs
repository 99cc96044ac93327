//! Scoring for simultaneous line clears

/// Points for clearing 1..=4 rows in a single tick
pub fn points_for(rows: usize) -> u64 {
    match rows {
        1 => 10,
        2 => 20,
        3 => 50,
        4 => 100,
        _ => 0,
    }
}

/// 7-digit zero-padded score text, e.g. `0000350`
pub fn format_score(points: u64) -> String {
    format!("{:07}", points)
}

/// Score tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score, never decreases
    pub points: u64,
    /// Total rows cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add score for rows cleared together, returns the points awarded
    pub fn add_clear(&mut self, rows: usize) -> u64 {
        let points = points_for(rows);
        self.points += points;
        self.lines += rows as u32;
        points
    }

    pub fn formatted(&self) -> String {
        format_score(self.points)
    }
}
