//! Falling-block puzzle core
//!
//! Board, pieces, randomizer, scoring and the tick-driven game loop. Nothing
//! here depends on a terminal or drawing library; hosts read a
//! [`scene::Scene`] and feed [`game::Action`]s back in.

pub mod bag;
pub mod board;
pub mod error;
pub mod game;
pub mod piece;
pub mod scene;
pub mod score;
pub mod settings;
pub mod tetromino;
