//! Toolkit-free draw intents
//!
//! A renderer turns a [`Scene`] into pixels or terminal cells; the core
//! never talks to a drawing API itself.

use crate::board::Cell;
use crate::game::{Game, GameState};
use crate::tetromino::Shade;

/// Where a block is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// The well, in board coordinates
    Board,
    /// The next-piece box, in the piece's spawn coordinates
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawIntent {
    Block {
        area: Area,
        x: i32,
        y: i32,
        shade: Shade,
    },
    Score(String),
    /// Total rows cleared so far
    Lines(u32),
    GameOver { score: String },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    pub intents: Vec<DrawIntent>,
}

impl Scene {
    pub fn capture(game: &Game) -> Self {
        let mut intents = Vec::new();

        for (y, row) in game.board().rows() {
            for (x, cell) in row.iter().enumerate() {
                if let Cell::Filled(shade) = cell {
                    intents.push(DrawIntent::Block {
                        area: Area::Board,
                        x: x as i32,
                        y: y as i32,
                        shade: *shade,
                    });
                }
            }
        }

        if let Some(piece) = game.current() {
            for (x, y) in piece.cells() {
                intents.push(DrawIntent::Block {
                    area: Area::Board,
                    x,
                    y,
                    shade: piece.shade(),
                });
            }
        }

        let next = game.next();
        for (x, y) in next.cells() {
            intents.push(DrawIntent::Block {
                area: Area::Preview,
                x,
                y,
                shade: next.shade(),
            });
        }

        intents.push(DrawIntent::Score(game.score().formatted()));
        intents.push(DrawIntent::Lines(game.score().lines));
        if game.state() == GameState::GameOver {
            intents.push(DrawIntent::GameOver {
                score: game.final_score(),
            });
        }

        Self { intents }
    }

    /// Blocks drawn in one area
    pub fn blocks(&self, area: Area) -> impl Iterator<Item = (i32, i32, Shade)> + '_ {
        self.intents.iter().filter_map(move |intent| match intent {
            DrawIntent::Block {
                area: a,
                x,
                y,
                shade,
            } if *a == area => Some((*x, *y, *shade)),
            _ => None,
        })
    }

    pub fn score(&self) -> Option<&str> {
        self.intents.iter().find_map(|intent| match intent {
            DrawIntent::Score(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn lines(&self) -> u32 {
        self.intents
            .iter()
            .find_map(|intent| match intent {
                DrawIntent::Lines(lines) => Some(*lines),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Final score text, present only once the game is over
    pub fn game_over(&self) -> Option<&str> {
        self.intents.iter().find_map(|intent| match intent {
            DrawIntent::GameOver { score } => Some(score.as_str()),
            _ => None,
        })
    }
}
