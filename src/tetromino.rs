//! Tetromino definitions and spawn shapes
//!
//! Kinds are indexed in a fixed order; the randomizer's opening set and
//! seeded history refer to these indices.

/// Color tag for a block. The renderer decides what each shade looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    Snow,
    Goldenrod,
    IndianRed,
}

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Square, // O
    Line,   // I
    RightL, // L
    LeftL,  // J
    RightZ, // S
    LeftZ,  // Z
    Tee,    // T
}

impl Kind {
    /// All kinds, ordered by index
    pub fn all() -> [Kind; 7] {
        [
            Kind::Square,
            Kind::Line,
            Kind::RightL,
            Kind::LeftL,
            Kind::RightZ,
            Kind::LeftZ,
            Kind::Tee,
        ]
    }

    /// Kind for an index in `0..7`
    pub fn from_index(index: usize) -> Option<Kind> {
        Self::all().get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Kind::Square => 0,
            Kind::Line => 1,
            Kind::RightL => 2,
            Kind::LeftL => 3,
            Kind::RightZ => 4,
            Kind::LeftZ => 5,
            Kind::Tee => 6,
        }
    }

    /// Get the color for this kind
    pub fn shade(&self) -> Shade {
        match self {
            Kind::Square | Kind::Line | Kind::Tee => Shade::Snow,
            Kind::RightL | Kind::LeftL => Shade::Goldenrod,
            Kind::RightZ | Kind::LeftZ => Shade::IndianRed,
        }
    }

    /// Absolute (x, y) cells at spawn. x grows rightward, y grows downward,
    /// row 0 is the top of the well.
    pub fn spawn_cells(&self) -> [(i32, i32); 4] {
        match self {
            // ##
            // ##
            Kind::Square => [(4, 0), (5, 0), (4, 1), (5, 1)],
            // ####
            Kind::Line => [(4, 0), (5, 0), (6, 0), (7, 0)],
            // ..#
            // ###
            Kind::RightL => [(6, 0), (4, 1), (5, 1), (6, 1)],
            // #..
            // ###
            Kind::LeftL => [(4, 0), (4, 1), (5, 1), (6, 1)],
            // .##
            // ##.
            Kind::RightZ => [(4, 1), (5, 1), (5, 0), (6, 0)],
            // ##.
            // .##
            Kind::LeftZ => [(4, 0), (5, 0), (5, 1), (6, 1)],
            // .#.
            // ###
            Kind::Tee => [(5, 0), (4, 1), (5, 1), (6, 1)],
        }
    }

    /// Whether rotation applies to this kind at all
    pub fn rotates(&self) -> bool {
        !matches!(self, Kind::Square)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Square => "square",
            Kind::Line => "line",
            Kind::RightL => "right_l",
            Kind::LeftL => "left_l",
            Kind::RightZ => "right_z",
            Kind::LeftZ => "left_z",
            Kind::Tee => "tee",
        }
    }
}
