//! BLOCKFALL - a falling-block puzzle for the terminal

mod input;
mod ui;

use blockfall::game::{Game, GameEvent, GameState};
use blockfall::scene::Scene;
use blockfall::settings::Settings;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Log to a file so the terminal UI stays clean
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let tick = settings.gameplay.tick_interval();
    tracing::info!(tick_ms = tick.as_millis() as u64, seed = ?settings.gameplay.seed, "settings loaded");

    let mut game = match settings.gameplay.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result?;

    tracing::info!(score = game.score().points, lines = game.score().lines, state = ?game.state(), "session finished");
    if game.state() == GameState::GameOver {
        println!("Game Over");
    }
    println!("Your score: {}", game.final_score());

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    tick: Duration,
) -> io::Result<()> {
    let mut next_tick = Instant::now() + tick;

    loop {
        log_events(game);

        // Render
        let scene = Scene::capture(game);
        terminal.draw(|frame| ui::render_game(frame, &scene))?;

        match game.state() {
            GameState::Playing => {}
            GameState::Terminated => return Ok(()),
            GameState::GameOver => {
                wait_for_key()?;
                return Ok(());
            }
        }

        // Wait for input until the next tick is due
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = input::action_for(key) {
                    game.process_action(action);
                }
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            game.tick();
            next_tick = now + tick;
        }
    }
}

/// Block until a key is pressed
fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn log_events(game: &mut Game) {
    for event in game.drain_events() {
        match event {
            GameEvent::LinesCleared { rows, points } => {
                tracing::info!("Cleared {} line(s) for {} points", rows.len(), points);
            }
            GameEvent::GameOver { score } => {
                tracing::info!("Game over with score {:07}", score);
            }
            GameEvent::Terminated { score } => {
                tracing::info!("Player quit with score {:07}", score);
            }
            other => tracing::trace!(?other, "game event"),
        }
    }
}
