//! History-biased piece randomizer
//!
//! Kinds are drawn from a pool of 35 entries (5 of each kind). A draw that
//! matches one of the last 4 emitted kinds is rerolled, up to 6 attempts,
//! and the pool slowly refills with the kinds that have gone longest unseen.
//! This keeps repeats rare while the long-run distribution stays uniform.

use crate::tetromino::Kind;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

const COPIES_PER_KIND: usize = 5;
const MAX_ROLLS: usize = 6;
/// Openers that avoid an early square or Z/S
const FIRST_KINDS: [Kind; 4] = [Kind::Line, Kind::RightL, Kind::LeftL, Kind::Tee];

/// The piece randomizer. Infinite, and deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct Bag {
    rng: ChaCha8Rng,
    pool: Vec<Kind>,
    /// Kinds ordered by when they were last emitted, oldest first
    order: Vec<Kind>,
    /// Last 4 emitted kinds, oldest first. Empty until the first draw.
    history: VecDeque<Kind>,
    last_forced: bool,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a randomizer seeded from the thread RNG
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        let pool = Kind::all()
            .iter()
            .copied()
            .cycle()
            .take(Kind::all().len() * COPIES_PER_KIND)
            .collect();
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            pool,
            order: Vec::with_capacity(7),
            history: VecDeque::with_capacity(4),
            last_forced: false,
        }
    }

    /// Get the next kind
    pub fn draw(&mut self) -> Kind {
        if self.history.is_empty() {
            return self.draw_first();
        }

        let mut slot = 0;
        let mut kind = self.pool[0];
        self.last_forced = false;
        for roll in 0..MAX_ROLLS {
            slot = self.rng.gen_range(0..self.pool.len());
            kind = self.pool[slot];
            if !self.history.contains(&kind) {
                break;
            }
            if roll == MAX_ROLLS - 1 {
                self.last_forced = true;
                break;
            }
            if let Some(&oldest) = self.order.first() {
                self.pool[slot] = oldest;
            }
        }

        self.order.retain(|&k| k != kind);
        self.order.push(kind);
        self.pool[slot] = self.order[0];
        self.history.pop_front();
        self.history.push_back(kind);
        kind
    }

    fn draw_first(&mut self) -> Kind {
        let kind = FIRST_KINDS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Kind::Tee);
        self.history
            .extend([Kind::RightZ, Kind::LeftZ, Kind::RightZ, kind]);
        self.last_forced = false;
        kind
    }

    /// Whether the last draw ran out of rerolls while still matching the history
    pub fn last_forced(&self) -> bool {
        self.last_forced
    }

    /// The recent-kind history, oldest first
    pub fn history(&self) -> impl Iterator<Item = Kind> + '_ {
        self.history.iter().copied()
    }
}

/// Supplies the kind of each new piece
pub trait PieceSource {
    fn next_kind(&mut self) -> Kind;
}

impl PieceSource for Bag {
    fn next_kind(&mut self) -> Kind {
        self.draw()
    }
}

/// Replays a fixed list of kinds, wrapping around at the end.
///
/// An empty list yields `Kind::Tee` forever.
#[derive(Debug, Clone)]
pub struct Sequence {
    kinds: Vec<Kind>,
    index: usize,
}

impl Sequence {
    pub fn new(kinds: Vec<Kind>) -> Self {
        Self { kinds, index: 0 }
    }
}

impl PieceSource for Sequence {
    fn next_kind(&mut self) -> Kind {
        if self.kinds.is_empty() {
            return Kind::Tee;
        }
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}

impl Iterator for Bag {
    type Item = Kind;

    fn next(&mut self) -> Option<Kind> {
        Some(self.draw())
    }
}
