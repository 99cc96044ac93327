//! Error types for the game core

use crate::tetromino::Kind;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The spawn cells of a new piece are already occupied. Ends the session.
    #[error("cannot spawn {} piece: spawn area is occupied", .kind.name())]
    SpawnBlocked { kind: Kind },
    /// Destination leaves the board or overlaps a locked block
    #[error("move blocked")]
    InvalidMove,
    #[error("rotation blocked")]
    InvalidRotation,
    /// The session is over; no further mutation is allowed
    #[error("game has finished")]
    Finished,
}
