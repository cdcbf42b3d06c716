use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;

use crate::config::{Config, GameKind};
use crate::engine::Session;
use crate::games::breakout::Breakout;
use crate::games::pong::Pong;
use crate::games::snake::Snake;
use crate::games::space_invaders::SpaceInvaders;
use crate::games::tetris::Tetris;
use crate::games::Input;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tab {
    Home,
    Game(GameKind),
}

impl Tab {
    pub fn all() -> [Tab; 6] {
        [
            Tab::Home,
            Tab::Game(GameKind::Snake),
            Tab::Game(GameKind::Tetris),
            Tab::Game(GameKind::Pong),
            Tab::Game(GameKind::Breakout),
            Tab::Game(GameKind::SpaceInvaders),
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Game(kind) => kind.title(),
        }
    }

    pub fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }
}

/// The one game currently mounted. Replacing it drops the previous session.
pub enum Mounted {
    Snake(Session<Snake>),
    Tetris(Session<Tetris>),
    Pong(Session<Pong>),
    Breakout(Session<Breakout>),
    SpaceInvaders(Session<SpaceInvaders>),
}

impl Mounted {
    fn new(kind: GameKind, seed: Option<u64>, now: Instant) -> Self {
        match kind {
            GameKind::Snake => Mounted::Snake(Session::new(seeded(seed, Snake::with_seed, Snake::new), now)),
            GameKind::Tetris => Mounted::Tetris(Session::new(seeded(seed, Tetris::with_seed, Tetris::new), now)),
            GameKind::Pong => Mounted::Pong(Session::new(seeded(seed, Pong::with_seed, Pong::new), now)),
            GameKind::Breakout => {
                Mounted::Breakout(Session::new(seeded(seed, Breakout::with_seed, Breakout::new), now))
            }
            GameKind::SpaceInvaders => Mounted::SpaceInvaders(Session::new(
                seeded(seed, SpaceInvaders::with_seed, SpaceInvaders::new),
                now,
            )),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Mounted::Snake(_) => GameKind::Snake,
            Mounted::Tetris(_) => GameKind::Tetris,
            Mounted::Pong(_) => GameKind::Pong,
            Mounted::Breakout(_) => GameKind::Breakout,
            Mounted::SpaceInvaders(_) => GameKind::SpaceInvaders,
        }
    }

    fn advance(&mut self, now: Instant) {
        match self {
            Mounted::Snake(s) => s.advance(now),
            Mounted::Tetris(s) => s.advance(now),
            Mounted::Pong(s) => s.advance(now),
            Mounted::Breakout(s) => s.advance(now),
            Mounted::SpaceInvaders(s) => s.advance(now),
        };
    }

    fn input(&mut self, input: Input) {
        match self {
            Mounted::Snake(s) => s.input(input),
            Mounted::Tetris(s) => s.input(input),
            Mounted::Pong(s) => s.input(input),
            Mounted::Breakout(s) => s.input(input),
            Mounted::SpaceInvaders(s) => s.input(input),
        }
    }
}

fn seeded<G>(seed: Option<u64>, with_seed: fn(u64) -> G, fresh: fn() -> G) -> G {
    match seed {
        Some(seed) => with_seed(seed),
        None => fresh(),
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize,
    pub mounted: Option<Mounted>,
    /// Playfield rectangle of the last frame, used to map the mouse onto the game.
    pub field_area: Option<Rect>,
    seed: Option<u64>,
    mounts: u64,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            mounted: None,
            field_area: None,
            seed: config.seed,
            mounts: 0,
        };
        if let Some(kind) = config.start_game {
            app.open(Tab::Game(kind));
        }
        app
    }

    pub fn open(&mut self, tab: Tab) {
        if tab == self.current_tab {
            return;
        }
        self.current_tab = tab;
        self.field_area = None;
        // tear down first so the old session is gone before the new one exists
        self.mounted = None;
        if let Tab::Game(kind) = tab {
            // each mount gets its own reproducible stream
            let seed = self.seed.map(|s| s.wrapping_add(self.mounts));
            self.mounts += 1;
            self.mounted = Some(Mounted::new(kind, seed, Instant::now()));
            if let Some(idx) = GameKind::ALL.iter().position(|k| *k == kind) {
                self.selected_game = idx;
            }
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.advance(Instant::now());
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if self.current_tab == Tab::Home => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc if self.current_tab != Tab::Home => {
                self.open(Tab::Home);
                return;
            }
            _ => {}
        }

        if self.current_tab == Tab::Home {
            self.on_home_key(key.code);
            return;
        }

        if let Some(mounted) = self.mounted.as_mut() {
            mounted.input(Input::Key(key.code));
        }
    }

    fn on_home_key(&mut self, code: KeyCode) {
        let count = GameKind::ALL.len();
        match code {
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.open(Tab::Game(GameKind::ALL[idx]));
            }
            KeyCode::Right | KeyCode::Down => self.selected_game = (self.selected_game + 1) % count,
            KeyCode::Left | KeyCode::Up => self.selected_game = (self.selected_game + count - 1) % count,
            KeyCode::Enter => self.open(Tab::Game(GameKind::ALL[self.selected_game])),
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let (Some(area), Some(mounted)) = (self.field_area, self.mounted.as_mut()) else {
            return;
        };
        if area.width == 0 {
            return;
        }
        let rel = f32::from(mouse.column.saturating_sub(area.x)) + 0.5;
        let fraction = (rel / f32::from(area.width)).clamp(0.0, 1.0);
        mounted.input(Input::Pointer(fraction));
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.open(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.open(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}
