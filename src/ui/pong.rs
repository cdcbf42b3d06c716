use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::field::{Field, Scale};
use super::overlay::{self, Outcome};
use crate::config::GameKind;
use crate::games::pong::{Pong, Side, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT, PADDLE_WIDTH};
use crate::games::Game;

const TITLE_COLOR: Color = Color::Rgb(230, 230, 230);

pub fn render(frame: &mut Frame, area: Rect, game: &Pong) -> Rect {
    let (left, right) = game.scores();
    let status = vec![Span::styled(
        format!("Left {left} : {right} Right"),
        Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
    )];
    let board = super::game_frame(frame, area, "Pong", TITLE_COLOR, None, status, game);

    let (w, h) = (board.width as usize, board.height as usize);
    let scale = Scale::new(w, h, FIELD_WIDTH, FIELD_HEIGHT);
    let mut field = Field::new(w, h, super::BG);
    let bg = Style::default().bg(super::BG);

    let mid = scale.x(FIELD_WIDTH / 2.0);
    for y in (0..h as i32).step_by(2) {
        field.put(mid, y, '┊', bg.fg(Color::Rgb(80, 80, 80)));
    }

    let (left_y, right_y) = game.paddles();
    let paddle = bg.fg(super::ACCENT);
    field.fill_rect(
        0,
        scale.y(left_y),
        scale.x(PADDLE_WIDTH),
        scale.y(left_y + PADDLE_HEIGHT),
        '█',
        paddle,
    );
    field.fill_rect(
        scale.x(FIELD_WIDTH - PADDLE_WIDTH),
        scale.y(right_y),
        w as i32,
        scale.y(right_y + PADDLE_HEIGHT),
        '█',
        paddle,
    );

    let (bx, by) = game.ball();
    field.put(scale.x(bx), scale.y(by), '●', bg.fg(Color::White));
    frame.render_widget(Paragraph::new(field.into_lines()), board);

    overlay::render(frame, board, GameKind::Pong, game.status(), || match game.winner() {
        Some(Side::Left) => Outcome::victory(" LEFT WINS ", format!("{left} : {right}")),
        Some(Side::Right) => Outcome::victory(" RIGHT WINS ", format!("{left} : {right}")),
        None => Outcome::game_over(format!("{left} : {right}")),
    });
    board
}
