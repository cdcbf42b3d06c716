pub mod breakout;
pub mod field;
pub mod home;
pub mod invaders;
pub mod overlay;
pub mod pong;
pub mod snake;
pub mod tabs;
pub mod tetris;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Mounted, Tab};
use crate::games::{Game, Phase, Status};

pub const BG: Color = Color::Rgb(42, 42, 42);
pub const ACCENT: Color = Color::Rgb(135, 147, 114);
pub const ACCENT_DARK: Color = Color::Rgb(98, 107, 81);

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    if app.current_tab == Tab::Home {
        home::render_home(frame, chunks[1], app.selected_game);
        return;
    }

    app.field_area = match app.mounted.as_ref() {
        Some(Mounted::Snake(s)) => Some(snake::render(frame, chunks[1], s.game())),
        Some(Mounted::Tetris(s)) => Some(tetris::render(frame, chunks[1], s.game())),
        Some(Mounted::Pong(s)) => Some(pong::render(frame, chunks[1], s.game())),
        Some(Mounted::Breakout(s)) => Some(breakout::render(frame, chunks[1], s.game())),
        Some(Mounted::SpaceInvaders(s)) => Some(invaders::render(frame, chunks[1], s.game())),
        None => None,
    };
}

/// Draws the bordered game panel with a status line on top and a help line below.
/// Two-player games pass `score: None` and show their own tally in `status`.
/// Returns the playfield area between them.
pub fn game_frame(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
    score: Option<u32>,
    status: Vec<Span<'static>>,
    game: &dyn Game,
) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));
    let mut line = vec![Span::raw(" ")];
    if let Some(score) = score {
        line.push(Span::styled(
            format!("Score: {score}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        line.push(separator.clone());
    }
    for (i, span) in status.into_iter().enumerate() {
        if i > 0 {
            line.push(separator.clone());
        }
        line.push(span);
    }
    frame.render_widget(Paragraph::new(Line::from(line)), chunks[0]);
    frame.render_widget(Paragraph::new(help_bar(game.status())), chunks[2]);
    chunks[1]
}

fn help_bar(status: Status) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    match status.phase {
        Phase::Over => Line::from(vec![
            Span::styled(" GAME OVER ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("Enter/R restart │ Esc menu", dim),
        ]),
        Phase::Paused => Line::from(vec![Span::styled(
            " PAUSED - P to resume ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Phase::Running => Line::from(vec![Span::styled(
            " H Help │ P Pause │ R Restart │ Tab Next game │ Esc Menu",
            dim,
        )]),
    }
}

/// Centers a `w`×`h` rectangle inside `area`, shrinking it to fit.
pub fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
