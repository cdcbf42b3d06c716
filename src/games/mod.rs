pub mod breakout;
pub mod pong;
pub mod snake;
pub mod space_invaders;
pub mod tetris;

use std::time::Duration;

use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Raw input forwarded by the front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Key(KeyCode),
    /// Pointer x as a fraction of the playfield width (0.0 left edge, 1.0 right edge).
    Pointer(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Over,
}

/// Lifecycle flags shared by every game. The help overlay does not suspend ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub phase: Phase,
    pub show_help: bool,
}

impl Status {
    pub fn new() -> Self {
        Self {
            phase: Phase::Running,
            show_help: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Over => Phase::Over,
        };
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn finish(&mut self) {
        self.phase = Phase::Over;
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys every game answers the same way.
pub enum Common {
    Pause,
    Help,
    Reset,
}

/// Maps `p`/`h`/`r` (and Enter once the game is over) to the shared lifecycle actions.
pub fn common_action(key: KeyCode, status: &Status) -> Option<Common> {
    match key {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Common::Pause),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Common::Help),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Common::Reset),
        KeyCode::Enter if status.is_over() => Some(Common::Reset),
        _ => None,
    }
}

pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub trait Game {
    fn name(&self) -> &'static str;
    /// Advance the simulation by one tick. A no-op unless running.
    fn update(&mut self);
    fn handle_input(&mut self, input: Input);
    /// Time between two ticks at the current state of the game.
    fn tick_interval(&self) -> Duration;
    fn status(&self) -> Status;
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool {
        self.status().is_over()
    }
}
