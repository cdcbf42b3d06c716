use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::field::Field;
use super::overlay::{self, Outcome};
use crate::config::GameKind;
use crate::games::snake::{Snake, GRID_SIZE};
use crate::games::Game;

const TITLE_COLOR: Color = Color::Rgb(80, 220, 80);
const FOOD_COLOR: Color = Color::Rgb(230, 90, 80);

pub fn render(frame: &mut Frame, area: Rect, game: &Snake) -> Rect {
    let status = vec![Span::styled(
        format!("Length: {}", game.body().len()),
        Style::default().fg(TITLE_COLOR),
    )];
    let field_area = 
        super::game_frame(frame, area, "Snake", TITLE_COLOR, Some(game.get_score()), status, game);
    let board = super::centered(field_area, GRID_SIZE as u16 * 2, GRID_SIZE as u16);

    let mut field = Field::new(GRID_SIZE as usize * 2, GRID_SIZE as usize, super::BG);
    let food = game.food();
    field.put_wide(food.x, food.y, ['◖', '◗'], Style::default().fg(FOOD_COLOR).bg(super::BG));
    for (i, cell) in game.body().iter().enumerate() {
        let color = if i == 0 { super::ACCENT } else { super::ACCENT_DARK };
        field.put_wide(cell.x, cell.y, ['█', '█'], Style::default().fg(color).bg(super::BG));
    }
    frame.render_widget(Paragraph::new(field.into_lines()), board);

    overlay::render(frame, field_area, GameKind::Snake, game.status(), || {
        Outcome::game_over(format!("Score: {}", game.get_score()))
    });
    board
}
