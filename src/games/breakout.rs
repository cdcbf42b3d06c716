use std::time::Duration;

use crossterm::event::KeyCode;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::games::{common_action, make_rng, Common, Game, Input, Status};

pub const FIELD_WIDTH: f32 = 480.0;
pub const FIELD_HEIGHT: f32 = 360.0;
pub const PADDLE_WIDTH: f32 = 75.0;
pub const PADDLE_HEIGHT: f32 = 10.0;
pub const PADDLE_Y: f32 = FIELD_HEIGHT - PADDLE_HEIGHT - 10.0;
pub const BALL_SIZE: f32 = 8.0;
pub const BALL_SPEED: f32 = 4.0;
pub const BRICK_ROWS: usize = 5;
pub const BRICK_COLS: usize = 8;
pub const BRICK_HEIGHT: f32 = 20.0;
const BRICK_PADDING: f32 = 4.0;
const BRICK_TOP: f32 = 30.0;
const BRICK_POINTS: u32 = 10;
const PADDLE_STEP: f32 = 20.0;
const START_LIVES: u32 = 3;
const TICK: Duration = Duration::from_micros(16_667);

/// Row colors, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickColor {
    Coral,
    Teal,
    Sky,
    Sage,
    Cream,
}

const ROW_COLORS: [BrickColor; BRICK_ROWS] = [
    BrickColor::Coral,
    BrickColor::Teal,
    BrickColor::Sky,
    BrickColor::Sage,
    BrickColor::Cream,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub color: BrickColor,
    pub visible: bool,
}

impl Brick {
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + BRICK_HEIGHT
    }
}

fn build_wall() -> Vec<Brick> {
    let width = (FIELD_WIDTH - BRICK_PADDING * (BRICK_COLS as f32 + 1.0)) / BRICK_COLS as f32;
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
    for (row, &color) in ROW_COLORS.iter().enumerate() {
        for col in 0..BRICK_COLS {
            bricks.push(Brick {
                x: col as f32 * (width + BRICK_PADDING) + BRICK_PADDING,
                y: row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_PADDING + BRICK_TOP,
                width,
                color,
                visible: true,
            });
        }
    }
    bricks
}

/// Horizontal velocity after a paddle bounce: -speed at the left edge, +speed at the right.
pub fn deflection(hit_position: f32) -> f32 {
    BALL_SPEED * (hit_position * 2.0 - 1.0)
}

pub struct Breakout {
    paddle_x: f32,
    ball_x: f32,
    ball_y: f32,
    ball_dx: f32,
    ball_dy: f32,
    bricks: Vec<Brick>,
    score: u32,
    lives: u32,
    won: bool,
    status: Status,
    rng: ChaCha8Rng,
}

impl Breakout {
    pub fn new() -> Self {
        Self::with_rng(make_rng(None))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(make_rng(Some(seed)))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            paddle_x: FIELD_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
            ball_x: FIELD_WIDTH / 2.0,
            ball_y: FIELD_HEIGHT - 30.0,
            ball_dx: BALL_SPEED,
            ball_dy: -BALL_SPEED,
            bricks: build_wall(),
            score: 0,
            lives: START_LIVES,
            won: false,
            status: Status::new(),
            rng,
        }
    }

    pub fn paddle_x(&self) -> f32 {
        self.paddle_x
    }

    pub fn ball(&self) -> (f32, f32) {
        (self.ball_x, self.ball_y)
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.ball_dx, self.ball_dy)
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn won(&self) -> bool {
        self.won
    }

    fn set_paddle(&mut self, x: f32) {
        self.paddle_x = x.clamp(0.0, FIELD_WIDTH - PADDLE_WIDTH);
    }

    fn respawn_ball(&mut self) {
        self.ball_x = FIELD_WIDTH / 2.0;
        self.ball_y = FIELD_HEIGHT - 30.0;
        self.ball_dx = if self.rng.gen_bool(0.5) { BALL_SPEED } else { -BALL_SPEED };
        self.ball_dy = -BALL_SPEED;
    }

    fn on_paddle(&self) -> bool {
        self.ball_y >= PADDLE_Y - BALL_SIZE
            && self.ball_y <= FIELD_HEIGHT - BALL_SIZE
            && self.ball_x >= self.paddle_x
            && self.ball_x <= self.paddle_x + PADDLE_WIDTH
    }

    fn move_ball(&mut self) {
        self.ball_x += self.ball_dx;
        self.ball_y += self.ball_dy;

        if self.ball_x <= BALL_SIZE {
            self.ball_dx = self.ball_dx.abs();
        } else if self.ball_x >= FIELD_WIDTH - BALL_SIZE {
            self.ball_dx = -self.ball_dx.abs();
        }
        if self.ball_y <= BALL_SIZE {
            self.ball_dy = self.ball_dy.abs();
        }

        if self.ball_dy > 0.0 && self.on_paddle() {
            let hit = (self.ball_x - self.paddle_x) / PADDLE_WIDTH;
            self.ball_dy = -self.ball_dy.abs();
            self.ball_dx = deflection(hit);
        }

        if self.ball_y >= FIELD_HEIGHT - BALL_SIZE {
            self.lose_ball();
            return;
        }

        self.hit_brick();
    }

    fn lose_ball(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.status.finish();
            info!(score = self.score, "breakout out of lives");
        } else {
            self.respawn_ball();
        }
    }

    fn hit_brick(&mut self) {
        let (x, y) = (self.ball_x, self.ball_y);
        let Some(brick) = self.bricks.iter_mut().find(|b| b.visible && b.contains(x, y)) else {
            return;
        };
        brick.visible = false;
        self.ball_dy = -self.ball_dy;
        self.score += BRICK_POINTS;

        if self.bricks.iter().all(|b| !b.visible) {
            self.won = true;
            self.status.finish();
            info!(score = self.score, lives = self.lives, "breakout cleared");
        }
    }
}

impl Default for Breakout {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Breakout {
    fn name(&self) -> &'static str {
        "Breakout"
    }

    fn update(&mut self) {
        if !self.status.is_running() {
            return;
        }
        self.move_ball();
    }

    fn handle_input(&mut self, input: Input) {
        let key = match input {
            Input::Pointer(fraction) => {
                if self.status.is_running() {
                    self.set_paddle(fraction * FIELD_WIDTH - PADDLE_WIDTH / 2.0);
                }
                return;
            }
            Input::Key(key) => key,
        };
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
            KeyCode::Left => self.set_paddle(self.paddle_x - PADDLE_STEP),
            KeyCode::Right => self.set_paddle(self.paddle_x + PADDLE_STEP),
            _ => {}
        }
    }

    fn tick_interval(&self) -> Duration {
        TICK
    }

    fn status(&self) -> Status {
        self.status
    }

    fn reset(&mut self) {
        self.paddle_x = FIELD_WIDTH / 2.0 - PADDLE_WIDTH / 2.0;
        self.bricks = build_wall();
        self.score = 0;
        self.lives = START_LIVES;
        self.won = false;
        self.status = Status::new();
        self.respawn_ball();
    }

    fn get_score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_layout() {
        let game = Breakout::with_seed(1);
        assert_eq!(game.bricks().len(), BRICK_ROWS * BRICK_COLS);
        let last = &game.bricks()[BRICK_COLS - 1];
        assert!((last.x + last.width + BRICK_PADDING - FIELD_WIDTH).abs() < 1e-3);
        assert_eq!(game.bricks()[BRICK_COLS].color, BrickColor::Teal);
    }

    #[test]
    fn centre_hit_goes_straight_up() {
        assert_eq!(deflection(0.5), 0.0);
        assert_eq!(deflection(0.0), -BALL_SPEED);
        assert_eq!(deflection(1.0), BALL_SPEED);

        let mut game = Breakout::with_seed(1);
        game.ball_x = game.paddle_x + PADDLE_WIDTH / 2.0;
        game.ball_y = PADDLE_Y - BALL_SIZE - 2.0;
        game.ball_dx = 0.0;
        game.ball_dy = BALL_SPEED;
        game.update();
        assert_eq!(game.velocity(), (0.0, -BALL_SPEED));
    }

    #[test]
    fn one_brick_per_tick() {
        let mut game = Breakout::with_seed(1);
        let target = game.bricks[0].clone();
        // a second brick on the same spot must survive this tick
        game.bricks.insert(1, target.clone());
        game.ball_x = target.x + 5.0;
        game.ball_y = target.y + 5.0 + BALL_SPEED;
        game.ball_dx = 0.0;
        game.ball_dy = -BALL_SPEED;
        game.update();
        assert!(!game.bricks[0].visible);
        assert!(game.bricks[1].visible);
        assert_eq!(game.get_score(), BRICK_POINTS);
        assert_eq!(game.velocity().1, BALL_SPEED);
    }

    #[test]
    fn last_brick_wins_in_the_same_tick() {
        let mut game = Breakout::with_seed(4);
        for brick in game.bricks.iter_mut().skip(1) {
            brick.visible = false;
        }
        let target = game.bricks[0].clone();
        game.ball_x = target.x + 5.0;
        game.ball_y = target.y + 5.0 + BALL_SPEED;
        game.ball_dx = 0.0;
        game.ball_dy = -BALL_SPEED;
        game.update();
        assert!(game.won());
        assert!(game.is_game_over());
    }

    #[test]
    fn losing_every_ball_ends_the_game() {
        let mut game = Breakout::with_seed(2);
        for expected in (0..START_LIVES).rev() {
            game.ball_x = 5.0 + BALL_SIZE;
            game.paddle_x = FIELD_WIDTH - PADDLE_WIDTH;
            game.ball_y = FIELD_HEIGHT - BALL_SIZE - 1.0;
            game.ball_dx = 0.0;
            game.ball_dy = BALL_SPEED;
            game.update();
            assert_eq!(game.lives(), expected);
        }
        assert!(game.is_game_over());
        assert!(!game.won());
    }

    #[test]
    fn pointer_centres_paddle() {
        let mut game = Breakout::with_seed(2);
        game.handle_input(Input::Pointer(0.5));
        assert_eq!(game.paddle_x(), FIELD_WIDTH / 2.0 - PADDLE_WIDTH / 2.0);
        game.handle_input(Input::Pointer(1.0));
        assert_eq!(game.paddle_x(), FIELD_WIDTH - PADDLE_WIDTH);
        game.handle_input(Input::Pointer(0.0));
        assert_eq!(game.paddle_x(), 0.0);
    }
}
