use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::field::{Field, Scale};
use super::overlay::{self, Outcome};
use crate::config::GameKind;
use crate::games::breakout::{
    BrickColor, Breakout, BRICK_HEIGHT, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT, PADDLE_WIDTH, PADDLE_Y,
};
use crate::games::Game;

const TITLE_COLOR: Color = Color::Rgb(220, 80, 80);

fn brick_color(color: BrickColor) -> Color {
    match color {
        BrickColor::Coral => Color::Rgb(240, 128, 128),
        BrickColor::Teal => Color::Rgb(78, 205, 196),
        BrickColor::Sky => Color::Rgb(69, 183, 209),
        BrickColor::Sage => Color::Rgb(150, 206, 180),
        BrickColor::Cream => Color::Rgb(255, 238, 173),
    }
}

/// Returns the playfield rectangle, which the app uses to map the mouse onto the paddle.
pub fn render(frame: &mut Frame, area: Rect, game: &Breakout) -> Rect {
    let hearts = "♥".repeat(game.lives() as usize);
    let status = vec![
        Span::styled(format!("Lives: {hearts}"), Style::default().fg(Color::Rgb(230, 80, 80))),
        Span::styled(
            format!("Bricks: {}", game.bricks_left()),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        ),
    ];
    let board = 
        super::game_frame(frame, area, "Breakout", TITLE_COLOR, Some(game.get_score()), status, game);

    let (w, h) = (board.width as usize, board.height as usize);
    let scale = Scale::new(w, h, FIELD_WIDTH, FIELD_HEIGHT);
    let mut field = Field::new(w, h, super::BG);
    let bg = Style::default().bg(super::BG);

    for brick in game.bricks().iter().filter(|b| b.visible) {
        field.fill_rect(
            scale.x(brick.x),
            scale.y(brick.y),
            scale.x(brick.x + brick.width),
            scale.y(brick.y + BRICK_HEIGHT),
            '▄',
            bg.fg(brick_color(brick.color)),
        );
    }

    let px = game.paddle_x();
    field.fill_rect(
        scale.x(px),
        scale.y(PADDLE_Y),
        scale.x(px + PADDLE_WIDTH),
        scale.y(PADDLE_Y + PADDLE_HEIGHT),
        '▀',
        bg.fg(super::ACCENT),
    );

    let (bx, by) = game.ball();
    field.put(scale.x(bx), scale.y(by), '●', bg.fg(Color::White));
    frame.render_widget(Paragraph::new(field.into_lines()), board);

    overlay::render(frame, board, GameKind::Breakout, game.status(), || {
        if game.won() {
            Outcome::victory(" YOU WIN! ", format!("Score: {}", game.get_score()))
        } else {
            Outcome::game_over(format!("Score: {}", game.get_score()))
        }
    });
    board
}
