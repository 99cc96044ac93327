//! Active falling piece logic

use crate::board::Board;
use crate::error::GameError;
use crate::tetromino::{Kind, Shade};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    Falling,
    /// Could not fall further; locked into the board on the next tick
    Stopped,
}

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: Kind,
    /// Absolute (x, y) board cells
    cells: [(i32, i32); 4],
    /// Counts applied rotations, starting at 1. Every even value shifts the
    /// rotated cells by (-1, +1) to cancel the drift of corner-based rotation.
    /// Only applied rotations advance it; blocked attempts leave it as is.
    rotation_parity: u32,
    state: PieceState,
}

impl Piece {
    /// Create a piece at its spawn cells, failing if any of them is occupied
    pub fn spawn(kind: Kind, board: &Board) -> Result<Self, GameError> {
        let piece = Self::preview(kind);
        if !board.can_place(&piece.cells) {
            return Err(GameError::SpawnBlocked { kind });
        }
        Ok(piece)
    }

    /// A piece at its spawn cells without checking the board, for the next-piece preview
    pub fn preview(kind: Kind) -> Self {
        Self {
            kind,
            cells: kind.spawn_cells(),
            rotation_parity: 1,
            state: PieceState::Falling,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn shade(&self) -> Shade {
        self.kind.shade()
    }

    /// Get the absolute positions of all 4 blocks
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.cells
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == PieceState::Stopped
    }

    /// Shift by (dx, dy) if the destination is free
    pub fn try_move(&mut self, dx: i32, dy: i32, board: &Board) -> Result<(), GameError> {
        if self.is_stopped() {
            return Err(GameError::InvalidMove);
        }
        let target = self.cells.map(|(x, y)| (x + dx, y + dy));
        if !board.can_place(&target) {
            return Err(GameError::InvalidMove);
        }
        self.cells = target;
        Ok(())
    }

    /// Try to move, returns true if successful
    pub fn move_by(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        self.try_move(dx, dy, board).is_ok()
    }

    /// Rotate 90° clockwise about the bounding-box center if the result fits.
    /// The square never changes.
    pub fn try_rotate(&mut self, board: &Board) -> Result<(), GameError> {
        if self.is_stopped() {
            return Err(GameError::InvalidRotation);
        }
        if !self.kind.rotates() {
            return Ok(());
        }
        let target = self.rotated_cells();
        if !board.can_place(&target) {
            tracing::trace!(kind = self.kind.name(), ?target, "rotation blocked");
            return Err(GameError::InvalidRotation);
        }
        self.cells = target;
        self.rotation_parity += 1;
        Ok(())
    }

    /// Try to rotate, returns true if the piece ends up in its rotated position
    pub fn rotate(&mut self, board: &Board) -> bool {
        self.try_rotate(board).is_ok()
    }

    /// Move down one row, or become stopped if that is not possible
    pub fn soft_drop_step(&mut self, board: &Board) -> bool {
        if self.move_by(0, 1, board) {
            true
        } else {
            self.state = PieceState::Stopped;
            false
        }
    }

    /// Cells after one clockwise turn.
    ///
    /// Each block's top-left corner is rotated about the center of the
    /// bounding box (corners span `[min, max + 1)`), and the offset from the
    /// block's old corner is floored to whole cells. Works in doubled
    /// coordinates so the half-cell center stays exact.
    fn rotated_cells(&self) -> [(i32, i32); 4] {
        let min_x = self.cells.iter().map(|c| c.0).min().unwrap_or(0);
        let min_y = self.cells.iter().map(|c| c.1).min().unwrap_or(0);
        let max_x = self.cells.iter().map(|c| c.0 + 1).max().unwrap_or(0);
        let max_y = self.cells.iter().map(|c| c.1 + 1).max().unwrap_or(0);
        let cx2 = min_x + max_x;
        let cy2 = min_y + max_y;
        let compensate = self.rotation_parity % 2 == 0;

        self.cells.map(|(x, y)| {
            let mut dx = (cx2 + cy2 - 2 * x - 2 * y).div_euclid(2);
            let mut dy = (cy2 - cx2 + 2 * x - 2 * y).div_euclid(2);
            if compensate {
                dx -= 1;
                dy += 1;
            }
            (x + dx, y + dy)
        })
    }
}
