//! Terminal UI rendering with ratatui

use blockfall::board::{BOARD_HEIGHT, BOARD_WIDTH};
use blockfall::scene::{Area, Scene};
use blockfall::tetromino::Shade;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const BLOCK: &str = "██";
/// Empty well cell: a dash on the grid line
const GRID: &str = "╌ ";
const EMPTY: &str = "  ";

/// Total width needed: board(22) + side panel(16) = 38
const GAME_WIDTH: u16 = 38;
/// board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

const WELL_BG: Color = Color::Rgb(77, 77, 77);
const PANEL_BG: Color = Color::Rgb(56, 56, 56);
const GRID_FG: Color = Color::Rgb(92, 92, 92);
const LABEL_FG: Color = Color::Rgb(205, 201, 201);

fn shade_color(shade: Shade) -> Color {
    match shade {
        Shade::Snow => Color::Rgb(205, 201, 201),
        Shade::Goldenrod => Color::Rgb(205, 155, 29),
        Shade::IndianRed => Color::Rgb(139, 58, 58),
    }
}

/// Render one frame from the scene
pub fn render_game(frame: &mut Frame, scene: &Scene) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Create main layout: board | next + score
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(16), // Next + score
        ])
        .split(game_area);

    render_board(frame, main_layout[0], scene);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next
            Constraint::Length(6), // Score
            Constraint::Min(0),
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], scene);
    render_score(frame, right_layout[1], scene);

    if let Some(score) = scene.game_over() {
        render_overlay(frame, area, "GAME OVER", &format!("Your score: {}", score));
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .style(Style::default().bg(PANEL_BG))
}

/// Render the well with its grid and all blocks
fn render_board(frame: &mut Frame, area: Rect, scene: &Scene) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(WELL_BG));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut grid = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
    for (x, y, shade) in scene.blocks(Area::Board) {
        if let Some(cell) = grid
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = Some(shade);
        }
    }

    let lines: Vec<Line> = grid
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    Some(shade) => Span::styled(BLOCK, Style::default().fg(shade_color(*shade))),
                    None => Span::styled(GRID, Style::default().fg(GRID_FG)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next piece box
fn render_next(frame: &mut Frame, area: Rect, scene: &Scene) {
    let block = panel(" NEXT ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let blocks: Vec<_> = scene.blocks(Area::Preview).collect();
    let min_x = blocks.iter().map(|b| b.0).min().unwrap_or(0);
    let min_y = blocks.iter().map(|b| b.1).min().unwrap_or(0);

    let mut lines = vec![Line::raw("")];
    for row in 0..2 {
        let spans: Vec<Span> = (0..4)
            .map(|col| {
                let hit = blocks
                    .iter()
                    .find(|b| b.0 - min_x == col && b.1 - min_y == row);
                match hit {
                    Some(&(_, _, shade)) => {
                        Span::styled(BLOCK, Style::default().fg(shade_color(shade)))
                    }
                    None => Span::raw(EMPTY),
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the score box
fn render_score(frame: &mut Frame, area: Rect, scene: &Scene) {
    let block = panel(" SCORE ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::raw(""),
        Line::styled(
            scene.score().unwrap_or("0000000").to_string(),
            Style::default().fg(LABEL_FG).bold(),
        ),
        Line::styled(format!("Lines {}", scene.lines()), Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

/// Render an overlay (for game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 26u16;
    let popup_height = 6u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" End of Game ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::styled(subtitle, Style::default().fg(LABEL_FG)),
        Line::raw(""),
        Line::styled("Press any key", Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
