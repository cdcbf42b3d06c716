use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::field::Field;
use super::overlay::{self, Outcome};
use crate::config::GameKind;
use crate::games::space_invaders::{SpaceInvaders, GRID_SIZE};
use crate::games::Game;

const TITLE_COLOR: Color = Color::Rgb(200, 120, 255);
const ENEMY_COLOR: Color = Color::Rgb(80, 255, 80);
const BULLET_COLOR: Color = Color::Rgb(255, 220, 80);
const PLAYER_COLOR: Color = Color::Rgb(100, 200, 255);

pub fn render(frame: &mut Frame, area: Rect, game: &SpaceInvaders) -> Rect {
    let status = vec![
        Span::styled(format!("Wave: {}", game.wave()), Style::default().fg(TITLE_COLOR)),
        Span::styled(
            format!("Step: {} ms", game.move_interval().as_millis()),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        ),
    ];
    let field_area = 
        super::game_frame(frame, area, "Invaders", TITLE_COLOR, Some(game.get_score()), status, game);
    let board = super::centered(field_area, GRID_SIZE as u16 * 2, GRID_SIZE as u16);

    let mut field = Field::new(GRID_SIZE as usize * 2, GRID_SIZE as usize, super::BG);
    let bg = Style::default().bg(super::BG);
    for enemy in game.enemies() {
        field.put_wide(enemy.x, enemy.y, ['╬', '╬'], bg.fg(ENEMY_COLOR));
    }
    for bullet in game.bullets() {
        field.put_wide(bullet.x, bullet.y, ['│', ' '], bg.fg(BULLET_COLOR));
    }
    let player = game.player();
    field.put_wide(player.x, player.y, ['▲', '▲'], bg.fg(PLAYER_COLOR));
    frame.render_widget(Paragraph::new(field.into_lines()), board);

    overlay::render(frame, field_area, GameKind::SpaceInvaders, game.status(), || {
        Outcome::game_over(format!("Score: {}  Wave: {}", game.get_score(), game.wave()))
    });
    board
}
