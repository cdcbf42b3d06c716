use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::field::Field;
use super::overlay::{self, Outcome};
use crate::config::GameKind;
use crate::games::tetris::{PieceKind, Tetris, GRID_HEIGHT, GRID_WIDTH};
use crate::games::Game;

const TITLE_COLOR: Color = Color::Rgb(100, 180, 255);

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Rgb(80, 220, 230),
        PieceKind::O => Color::Rgb(240, 220, 80),
        PieceKind::T => Color::Rgb(190, 110, 240),
        PieceKind::S => Color::Rgb(100, 220, 100),
        PieceKind::Z => Color::Rgb(230, 80, 80),
        PieceKind::J => Color::Rgb(80, 120, 240),
        PieceKind::L => Color::Rgb(240, 160, 60),
    }
}

pub fn render(frame: &mut Frame, area: Rect, game: &Tetris) -> Rect {
    let status = vec![
        Span::styled(format!("Level: {}", game.level()), Style::default().fg(TITLE_COLOR)),
        Span::styled(format!("Lines: {}", game.lines()), Style::default().fg(Color::Rgb(180, 180, 200))),
    ];
    let field_area = 
        super::game_frame(frame, area, "Tetris", TITLE_COLOR, Some(game.get_score()), status, game);
    let board = super::centered(field_area, GRID_WIDTH as u16 * 2, GRID_HEIGHT as u16);

    let mut field = Field::new(GRID_WIDTH as usize * 2, GRID_HEIGHT as usize, super::BG);
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            match game.grid().get(x, y) {
                Some(kind) => field.put_wide(x, y, ['█', '█'], Style::default().fg(piece_color(kind))),
                None => field.put_wide(x, y, [' ', '·'], Style::default().fg(Color::Rgb(70, 70, 70)).bg(super::BG)),
            }
        }
    }
    if !game.is_game_over() {
        let piece = game.piece();
        let style = Style::default().fg(piece_color(piece.kind));
        for (x, y) in piece.absolute() {
            field.put_wide(x, y, ['▓', '▓'], style);
        }
    }
    frame.render_widget(Paragraph::new(field.into_lines()), board);

    overlay::render(frame, field_area, GameKind::Tetris, game.status(), || {
        Outcome::game_over(format!("Score: {}  Lines: {}", game.get_score(), game.lines()))
    });
    board
}
