use std::time::Duration;

use crossterm::event::KeyCode;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::games::{common_action, make_rng, Common, Game, Input, Status};

pub const GRID_SIZE: i32 = 20;
pub const MAX_BULLETS: usize = 3;
pub const ENEMY_ROWS: i32 = 3;
pub const ENEMIES_PER_ROW: i32 = 8;
pub const INITIAL_MOVE_INTERVAL_MS: u64 = 800;
pub const SPEED_INCREASE_INTERVAL_MS: u64 = 10_000;
pub const SPEED_INCREASE_FACTOR: f64 = 0.9;
pub const MIN_MOVE_INTERVAL_MS: u64 = 200;
/// Bullet step; also the base tick of the whole game.
pub const TICK_MS: u64 = 50;
const HIT_POINTS: u32 = 10;
const WAVE_BONUS: u32 = 50;
const PLAYER_START: Cell = Cell { x: 10, y: 18 };
const EXTRA_STEP_CHANCE: f64 = 0.1;
const EXTRA_DROP_CHANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

fn formation() -> Vec<Cell> {
    (0..ENEMY_ROWS)
        .flat_map(|row| (0..ENEMIES_PER_ROW).map(move |col| Cell { x: col * 2 + 2, y: row + 2 }))
        .collect()
}

pub struct SpaceInvaders {
    player: Cell,
    bullets: Vec<Cell>,
    enemies: Vec<Cell>,
    direction: i32,
    move_interval_ms: f64,
    // running-time accumulators, advanced by TICK_MS per unpaused tick
    move_clock_ms: u64,
    speed_clock_ms: u64,
    wave: u32,
    score: u32,
    status: Status,
    rng: ChaCha8Rng,
}

impl SpaceInvaders {
    pub fn new() -> Self {
        Self::with_rng(make_rng(None))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(make_rng(Some(seed)))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            player: PLAYER_START,
            bullets: Vec::new(),
            enemies: formation(),
            direction: 1,
            move_interval_ms: INITIAL_MOVE_INTERVAL_MS as f64,
            move_clock_ms: 0,
            speed_clock_ms: 0,
            wave: 1,
            score: 0,
            status: Status::new(),
            rng,
        }
    }

    pub fn player(&self) -> Cell {
        self.player
    }

    pub fn bullets(&self) -> &[Cell] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Cell] {
        &self.enemies
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_nanos((self.move_interval_ms * 1_000_000.0).round() as u64)
    }

    fn shoot(&mut self) {
        if self.bullets.len() < MAX_BULLETS {
            self.bullets.push(Cell {
                x: self.player.x,
                y: self.player.y - 1,
            });
        }
    }

    fn speed_up(&mut self) {
        self.move_interval_ms =
            (self.move_interval_ms * SPEED_INCREASE_FACTOR).max(MIN_MOVE_INTERVAL_MS as f64);
        debug!(interval_ms = self.move_interval_ms, "invaders speed up");
    }

    fn move_enemies(&mut self) {
        let Some(lowest) = self.enemies.iter().map(|e| e.y).max() else {
            return;
        };
        if lowest >= self.player.y - 1 {
            self.status.finish();
            info!(score = self.score, wave = self.wave, "invaders reached the player");
            return;
        }

        let leftmost = self.enemies.iter().map(|e| e.x).min().unwrap_or(0);
        let rightmost = self.enemies.iter().map(|e| e.x).max().unwrap_or(0);
        let at_edge = (self.direction == 1 && rightmost >= GRID_SIZE - 2)
            || (self.direction == -1 && leftmost <= 1);
        if at_edge {
            self.direction = -self.direction;
        }

        let dir = self.direction;
        for enemy in &mut self.enemies {
            if at_edge {
                enemy.y += 1;
            } else {
                let extra = if self.rng.gen_bool(EXTRA_STEP_CHANCE) { dir } else { 0 };
                enemy.x = (enemy.x + dir + extra).clamp(1, GRID_SIZE - 2);
            }
            if self.rng.gen_bool(EXTRA_DROP_CHANCE) {
                enemy.y += 1;
            }
        }
    }

    fn move_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.y -= 1;
        }
        self.bullets.retain(|b| b.y >= 0);

        let hit: Vec<Cell> = self
            .enemies
            .iter()
            .copied()
            .filter(|e| self.bullets.contains(e))
            .collect();
        if !hit.is_empty() {
            self.enemies.retain(|e| !hit.contains(e));
            self.bullets.retain(|b| !hit.contains(b));
            self.score += hit.len() as u32 * HIT_POINTS;
        }

        if self.enemies.is_empty() {
            self.next_wave();
        }
    }

    fn next_wave(&mut self) {
        self.enemies = formation();
        self.move_interval_ms = INITIAL_MOVE_INTERVAL_MS as f64;
        self.score += WAVE_BONUS;
        self.wave += 1;
        info!(wave = self.wave, score = self.score, "invader wave cleared");
    }
}

impl Default for SpaceInvaders {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SpaceInvaders {
    fn name(&self) -> &'static str {
        "Space Invaders"
    }

    fn update(&mut self) {
        if !self.status.is_running() {
            return;
        }
        self.move_bullets();

        self.speed_clock_ms += TICK_MS;
        if self.speed_clock_ms >= SPEED_INCREASE_INTERVAL_MS {
            self.speed_clock_ms = 0;
            self.speed_up();
        }

        self.move_clock_ms += TICK_MS;
        if self.move_clock_ms as f64 >= self.move_interval_ms {
            self.move_clock_ms = 0;
            self.move_enemies();
        }
    }

    fn handle_input(&mut self, input: Input) {
        let Input::Key(key) = input else { return };
        match common_action(key, &self.status) {
            Some(Common::Pause) => return self.status.toggle_pause(),
            Some(Common::Help) => return self.status.toggle_help(),
            Some(Common::Reset) => return self.reset(),
            None => {}
        }
        if !self.status.is_running() {
            return;
        }
        match key {
            KeyCode::Left => self.player.x = (self.player.x - 1).max(0),
            KeyCode::Right => self.player.x = (self.player.x + 1).min(GRID_SIZE - 1),
            KeyCode::Char(' ') | KeyCode::Up => self.shoot(),
            _ => {}
        }
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(TICK_MS)
    }

    fn status(&self) -> Status {
        self.status
    }

    fn reset(&mut self) {
        self.player = PLAYER_START;
        self.bullets.clear();
        self.enemies = formation();
        self.direction = 1;
        self.move_interval_ms = INITIAL_MOVE_INTERVAL_MS as f64;
        self.move_clock_ms = 0;
        self.speed_clock_ms = 0;
        self.wave = 1;
        self.score = 0;
        self.status = Status::new();
    }

    fn get_score(&self) -> u32 {
        self.score
    }
}
