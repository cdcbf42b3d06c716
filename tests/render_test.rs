use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

use pocket_arcade::app::App;
use pocket_arcade::config::{Config, GameKind};
use pocket_arcade::games::snake::Snake;
use pocket_arcade::games::Game;
use pocket_arcade::ui;

fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area();
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn draw(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn app_with(start_game: Option<GameKind>) -> App {
    App::new(&Config {
        seed: Some(11),
        start_game,
        ..Config::default()
    })
}

#[test]
fn home_lists_every_game() {
    let mut app = app_with(None);
    let text = draw(&mut app);
    assert!(text.contains("Pocket Arcade"));
    for kind in GameKind::ALL {
        assert!(text.contains(kind.title()), "missing {}", kind.title());
    }
    assert!(app.field_area.is_none());
}

#[test]
fn every_game_renders_and_reports_its_field() {
    for kind in GameKind::ALL {
        let mut app = app_with(Some(kind));
        let text = draw(&mut app);
        if kind != GameKind::Pong {
            assert!(text.contains("Score: 0"), "{:?}", kind);
        }
        let area = app.field_area.expect("field area after drawing a game");
        assert!(area.width > 0 && area.height > 0);
    }
}

#[test]
fn pong_shows_both_sides_instead_of_a_single_score() {
    let mut app = app_with(Some(GameKind::Pong));
    let text = draw(&mut app);
    assert!(text.contains("Left 0 : 0 Right"));
    assert!(!text.contains("Score:"));
}

#[test]
fn pause_and_help_overlays() {
    let mut app = app_with(Some(GameKind::Tetris));
    app.on_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE));
    assert!(draw(&mut app).contains("Press P to resume"));

    app.on_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE));
    let text = draw(&mut app);
    assert!(text.contains("HELP"));
    assert!(text.contains("Hard drop"));
}

#[test]
fn game_over_popup_shows_the_score() {
    let mut game = Snake::with_seed(1);
    for _ in 0..10 {
        game.update();
    }
    assert!(game.is_game_over());

    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal
        .draw(|frame| {
            ui::snake::render(frame, frame.area(), &game);
        })
        .unwrap();
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Enter / R to play again"));
}
