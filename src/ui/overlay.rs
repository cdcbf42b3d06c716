use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::GameKind;
use crate::games::{Phase, Status};

/// What a finished game wants to say in its popup.
pub struct Outcome {
    pub title: &'static str,
    pub detail: String,
    pub color: Color,
}

impl Outcome {
    pub fn game_over(detail: String) -> Self {
        Self { title: " GAME OVER ", detail, color: Color::Rgb(230, 80, 80) }
    }

    pub fn victory(title: &'static str, detail: String) -> Self {
        Self { title, detail, color: Color::Rgb(255, 220, 80) }
    }
}

/// Draws whichever popup the game status calls for. Help wins over pause and game over.
pub fn render(frame: &mut Frame, area: Rect, kind: GameKind, status: Status, outcome: impl FnOnce() -> Outcome) {
    if status.show_help {
        render_help(frame, area, kind);
        return;
    }
    match status.phase {
        Phase::Paused => popup(
            frame,
            area,
            " PAUSED ",
            Color::Rgb(255, 220, 80),
            vec![
                Line::from(""),
                Line::from(Span::styled("Press P to resume", Style::default().fg(Color::Rgb(180, 180, 200)))),
            ],
        ),
        Phase::Over => {
            let outcome = outcome();
            popup(
                frame,
                area,
                outcome.title,
                outcome.color,
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        outcome.detail,
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Enter / R to play again",
                        Style::default().fg(Color::Rgb(140, 140, 140)),
                    )),
                ],
            )
        }
        Phase::Running => {}
    }
}

fn render_help(frame: &mut Frame, area: Rect, kind: GameKind) {
    let mut lines = vec![Line::from("")];
    for (key, action) in super::home::controls(kind) {
        lines.push(Line::from(vec![
            Span::styled(format!("{key:>12}  "), Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled(format!("{action:<18}"), Style::default().fg(Color::Rgb(180, 180, 200))),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("H to close", Style::default().fg(Color::Rgb(140, 140, 140)))));
    popup(frame, area, " HELP ", Color::Rgb(80, 200, 255), lines);
}

fn popup(frame: &mut Frame, area: Rect, title: &str, color: Color, lines: Vec<Line<'_>>) {
    let overlay_w = 40u16.min(area.width.saturating_sub(2));
    let overlay_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = super::centered(area, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(title.to_string())
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
