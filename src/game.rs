//! Core game state and logic
//!
//! One tick runs the piece cycle: a piece that stopped on the previous tick
//! is locked, full rows are cleared and scored, the preview piece is promoted
//! (or the game ends if it cannot be placed), and the current piece falls one
//! row. Player actions are applied between ticks, never during one.

use crate::bag::{Bag, PieceSource};
use crate::board::Board;
use crate::error::GameError;
use crate::piece::Piece;
use crate::score::{Score, format_score};
use crate::tetromino::Kind;

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// A new piece could not be spawned
    GameOver,
    /// The player quit
    Terminated,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Quit,
}

/// Things that happened, for the host to render or log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Spawned(Kind),
    Locked(Kind),
    LinesCleared { rows: Vec<usize>, points: u64 },
    ScoreChanged(u64),
    GameOver { score: u64 },
    Terminated { score: u64 },
}

/// The main game struct
pub struct Game {
    board: Board,
    /// Current falling piece. None only once the game is over.
    current: Option<Piece>,
    /// Preview of the piece that spawns next
    next: Piece,
    source: Box<dyn PieceSource>,
    score: Score,
    state: GameState,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a new game with a randomly seeded bag
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a new game whose piece order is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(Board::new(), Box::new(Bag::with_seed(seed)))
    }

    /// Start from a prepared board. Ends immediately if the first piece
    /// cannot be placed.
    pub fn with_source(board: Board, mut source: Box<dyn PieceSource>) -> Self {
        let first = source.next_kind();
        let next = Piece::preview(source.next_kind());
        let mut game = Self {
            board,
            current: None,
            next,
            source,
            score: Score::new(),
            state: GameState::Playing,
            events: Vec::new(),
        };

        match Piece::spawn(first, &game.board) {
            Ok(piece) => {
                tracing::debug!(kind = first.name(), "spawned first piece");
                game.events.push(GameEvent::Spawned(first));
                game.current = Some(piece);
            }
            Err(err) => game.game_over(err),
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// The piece shown in the preview area
    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != GameState::Playing
    }

    /// Score text for the end-of-game notification
    pub fn final_score(&self) -> String {
        format_score(self.score.points)
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Process an action. Blocked moves are silently ignored.
    pub fn process_action(&mut self, action: Action) {
        if let Err(err) = self.try_action(action) {
            tracing::trace!(?action, %err, "action ignored");
        }
    }

    /// Process an action, reporting why it had no effect
    pub fn try_action(&mut self, action: Action) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::Finished);
        }
        if action == Action::Quit {
            self.state = GameState::Terminated;
            tracing::debug!(score = self.score.points, "game terminated by player");
            self.events.push(GameEvent::Terminated {
                score: self.score.points,
            });
            return Ok(());
        }

        let Some(piece) = &mut self.current else {
            return Err(GameError::Finished);
        };
        match action {
            Action::MoveLeft => piece.try_move(-1, 0, &self.board),
            Action::MoveRight => piece.try_move(1, 0, &self.board),
            Action::SoftDrop => piece.try_move(0, 1, &self.board),
            Action::Rotate => piece.try_rotate(&self.board),
            Action::Quit => Ok(()),
        }
    }

    /// Advance one timer interval
    pub fn tick(&mut self) {
        if self.is_finished() {
            return;
        }

        let locked = self.lock_stopped_piece();
        self.clear_lines();

        if locked {
            if let Err(err) = self.spawn_next() {
                self.game_over(err);
                return;
            }
        }

        if let Some(piece) = &mut self.current {
            if !piece.soft_drop_step(&self.board) {
                tracing::trace!(kind = piece.kind().name(), "piece stopped");
            }
        }
    }

    /// Fold a stopped piece into the board, returns true if one was locked
    fn lock_stopped_piece(&mut self) -> bool {
        let Some(piece) = self.current.take_if(|piece| piece.is_stopped()) else {
            return false;
        };
        self.board.lock(&piece.cells(), piece.shade());
        tracing::debug!(kind = piece.kind().name(), cells = ?piece.cells(), "locked piece");
        self.events.push(GameEvent::Locked(piece.kind()));
        true
    }

    /// Remove every full row in one pass and score them together
    fn clear_lines(&mut self) {
        let rows = self.board.full_rows();
        if rows.is_empty() {
            return;
        }
        self.board.clear_rows(&rows);
        let points = self.score.add_clear(rows.len());
        tracing::debug!(?rows, points, total = self.score.points, "cleared lines");
        self.events.push(GameEvent::LinesCleared { rows, points });
        self.events.push(GameEvent::ScoreChanged(self.score.points));
    }

    /// Promote the preview piece and draw a new preview
    fn spawn_next(&mut self) -> Result<(), GameError> {
        let kind = self.next.kind();
        self.next = Piece::preview(self.source.next_kind());
        let piece = Piece::spawn(kind, &self.board)?;
        tracing::debug!(kind = kind.name(), next = self.next.kind().name(), "spawned piece");
        self.events.push(GameEvent::Spawned(kind));
        self.current = Some(piece);
        Ok(())
    }

    fn game_over(&mut self, err: GameError) {
        tracing::debug!(%err, score = self.score.points, "game over");
        self.current = None;
        self.state = GameState::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.score.points,
        });
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::Sequence;
    use crate::board::{BOARD_HEIGHT, Cell};
    use crate::tetromino::Shade;

    fn game_with(board: Board, kinds: Vec<Kind>) -> Game {
        Game::with_source(board, Box::new(Sequence::new(kinds)))
    }

    #[test]
    fn test_starts_with_current_and_next() {
        let mut game = game_with(Board::new(), vec![Kind::Tee, Kind::Line]);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.current().map(Piece::kind), Some(Kind::Tee));
        assert_eq!(game.next().kind(), Kind::Line);
        assert_eq!(game.drain_events(), vec![GameEvent::Spawned(Kind::Tee)]);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_tick_drops_one_row() {
        let mut game = game_with(Board::new(), vec![Kind::Square]);
        game.tick();
        let cells = game.current().unwrap().cells();
        assert_eq!(cells, [(4, 1), (5, 1), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_actions_move_piece() {
        let mut game = game_with(Board::new(), vec![Kind::Square]);
        game.process_action(Action::MoveLeft);
        game.process_action(Action::MoveLeft);
        game.process_action(Action::MoveRight);
        game.process_action(Action::SoftDrop);
        assert_eq!(
            game.current().unwrap().cells(),
            [(3, 1), (4, 1), (3, 2), (4, 2)]
        );
    }

    #[test]
    fn test_blocked_action_reports_error() {
        let mut game = game_with(Board::new(), vec![Kind::Line]);
        assert_eq!(game.try_action(Action::Rotate), Err(GameError::InvalidRotation));
        for _ in 0..2 {
            game.process_action(Action::MoveRight);
        }
        assert_eq!(game.try_action(Action::MoveRight), Err(GameError::InvalidMove));
    }

    #[test]
    fn test_piece_locks_tick_after_stopping() {
        let mut game = game_with(Board::new(), vec![Kind::Square, Kind::Tee]);
        // Square falls from rows 0-1 to rows 18-19 in 18 ticks
        for _ in 0..18 {
            game.tick();
        }
        assert!(!game.current().unwrap().is_stopped());
        game.tick();
        assert!(game.current().unwrap().is_stopped());
        assert!(game.board().is_empty());

        game.tick();
        assert_eq!(game.board().occupied_count(), 4);
        assert!(game.board().is_occupied(4, BOARD_HEIGHT as i32 - 1));
        assert_eq!(game.current().unwrap().kind(), Kind::Tee);
        // The new piece already fell once this tick
        assert_eq!(game.current().unwrap().cells(), [(5, 1), (4, 2), (5, 2), (6, 2)]);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Locked(Kind::Square)));
        assert!(events.contains(&GameEvent::Spawned(Kind::Tee)));
    }

    #[test]
    fn test_quit_preserves_score() {
        let mut game = game_with(Board::new(), vec![Kind::Tee]);
        game.process_action(Action::Quit);
        assert_eq!(game.state(), GameState::Terminated);
        assert_eq!(game.final_score(), "0000000");
        assert_eq!(game.try_action(Action::MoveLeft), Err(GameError::Finished));

        let before = game.current().cloned();
        game.tick();
        assert_eq!(game.current().cloned(), before);
    }

    #[test]
    fn test_blocked_first_spawn_ends_game() {
        let mut board = Board::new();
        board.set(5, 1, Cell::Filled(Shade::Snow));
        let mut game = game_with(board, vec![Kind::Tee]);
        assert_eq!(game.state(), GameState::GameOver);
        assert!(game.current().is_none());
        assert_eq!(game.drain_events(), vec![GameEvent::GameOver { score: 0 }]);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Game::with_seed(11);
        let mut b = Game::with_seed(11);
        for _ in 0..200 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.state(), b.state());
        assert_eq!(a.next().kind(), b.next().kind());
    }
}
