//! End-to-end game scenarios driven through the public API

use blockfall::bag::Sequence;
use blockfall::board::{BOARD_WIDTH, Board, Cell};
use blockfall::error::GameError;
use blockfall::game::{Action, Game, GameEvent, GameState};
use blockfall::tetromino::{Kind, Shade};

fn game_with(board: Board, kinds: Vec<Kind>) -> Game {
    let mut game = Game::with_source(board, Box::new(Sequence::new(kinds)));
    game.drain_events();
    game
}

/// Tick until the current piece is locked, returning that tick's events
fn tick_until_locked(game: &mut Game) -> Vec<GameEvent> {
    for _ in 0..100 {
        game.tick();
        let events = game.drain_events();
        if events.iter().any(|e| matches!(e, GameEvent::Locked(_))) {
            return events;
        }
    }
    panic!("piece never locked");
}

fn fill(board: &mut Board, y: i32, cols: impl IntoIterator<Item = i32>) {
    for x in cols {
        board.set(x, y, Cell::Filled(Shade::Goldenrod));
    }
}

#[test]
fn completing_one_row_with_lines_scores_ten() {
    let mut board = Board::new();
    fill(&mut board, 19, 0..2);
    board.set(0, 18, Cell::Filled(Shade::IndianRed));
    let mut game = game_with(board, vec![Kind::Line]);

    // First line fills columns 2..=5
    game.process_action(Action::MoveLeft);
    game.process_action(Action::MoveLeft);
    let events = tick_until_locked(&mut game);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::LinesCleared { .. })));
    assert_eq!(game.score().points, 0);

    // Second line fills columns 6..=9 and completes the bottom row
    game.process_action(Action::MoveRight);
    game.process_action(Action::MoveRight);
    let events = tick_until_locked(&mut game);
    assert!(events.contains(&GameEvent::LinesCleared {
        rows: vec![19],
        points: 10
    }));
    assert!(events.contains(&GameEvent::ScoreChanged(10)));

    assert_eq!(game.score().points, 10);
    assert_eq!(game.score().lines, 1);
    // Only the block that sat above the cleared row remains, one row lower
    assert_eq!(game.board().occupied_count(), 1);
    assert_eq!(game.board().get(0, 19), Some(Cell::Filled(Shade::IndianRed)));
    assert!(game.board().full_rows().is_empty());
}

#[test]
fn completing_two_rows_at_once_scores_twenty() {
    let mut board = Board::new();
    fill(&mut board, 19, 0..8);
    fill(&mut board, 18, 0..8);
    board.set(3, 17, Cell::Filled(Shade::Snow));
    let mut game = game_with(board, vec![Kind::Square]);

    for _ in 0..4 {
        game.process_action(Action::MoveRight);
    }
    let events = tick_until_locked(&mut game);

    let clears: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LinesCleared { .. }))
        .collect();
    assert_eq!(
        clears,
        vec![&GameEvent::LinesCleared {
            rows: vec![18, 19],
            points: 20
        }]
    );
    assert_eq!(game.score().points, 20);
    assert_eq!(game.board().occupied_count(), 1);
    assert_eq!(game.board().get(3, 19), Some(Cell::Filled(Shade::Snow)));
}

#[test]
fn blocked_spawn_ends_game_with_score_unchanged() {
    let mut board = Board::new();
    for y in 2..20 {
        fill(&mut board, y, 0..BOARD_WIDTH as i32 - 1);
    }
    let mut game = game_with(board, vec![Kind::Square]);

    // The square cannot fall at all, then locks in the spawn area
    game.tick();
    assert!(game.current().unwrap().is_stopped());
    game.tick();

    assert_eq!(game.state(), GameState::GameOver);
    assert!(game.current().is_none());
    assert_eq!(game.final_score(), "0000000");
    let events = game.drain_events();
    assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));

    // Nothing moves after game over
    let board = game.board().clone();
    game.tick();
    assert_eq!(game.board(), &board);
    assert_eq!(game.try_action(Action::Rotate), Err(GameError::Finished));
    assert!(game.drain_events().is_empty());
}

#[test]
fn pre_occupied_spawn_area_never_creates_a_piece() {
    let mut board = Board::new();
    board.set(6, 0, Cell::Filled(Shade::Snow));
    let mut game = Game::with_source(board, Box::new(Sequence::new(vec![Kind::Line])));

    assert_eq!(game.state(), GameState::GameOver);
    assert!(game.current().is_none());
    assert_eq!(game.drain_events(), vec![GameEvent::GameOver { score: 0 }]);
}

#[test]
fn escape_keeps_final_score() {
    let mut board = Board::new();
    fill(&mut board, 19, 0..6);
    let mut game = game_with(board, vec![Kind::Line]);

    game.process_action(Action::MoveRight);
    game.process_action(Action::MoveRight);
    tick_until_locked(&mut game);
    assert_eq!(game.score().points, 10);

    game.process_action(Action::Quit);
    assert_eq!(game.state(), GameState::Terminated);
    assert_eq!(game.final_score(), "0000010");
    assert_eq!(game.drain_events(), vec![GameEvent::Terminated { score: 10 }]);
}

#[test]
fn manual_soft_drop_is_independent_of_ticks() {
    let mut game = game_with(Board::new(), vec![Kind::Tee]);
    for _ in 0..18 {
        game.process_action(Action::SoftDrop);
    }
    assert_eq!(game.try_action(Action::SoftDrop), Err(GameError::InvalidMove));
    // Still falling until a tick notices it cannot move
    assert!(!game.current().unwrap().is_stopped());
    game.tick();
    assert!(game.current().unwrap().is_stopped());
    assert_eq!(game.try_action(Action::MoveLeft), Err(GameError::InvalidMove));
}

#[test]
fn seeded_game_runs_to_completion() {
    let mut game = Game::with_seed(2024);
    let mut ticks = 0;
    while !game.is_finished() && ticks < 10_000 {
        game.tick();
        ticks += 1;
    }
    // Pieces pile up in the middle until the spawn area is blocked
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.score().points, 0);
}
