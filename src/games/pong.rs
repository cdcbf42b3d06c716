use std::time::Duration;

use crossterm::event::KeyCode;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::games::{common_action, make_rng, Common, Game, Input, Status};

pub const FIELD_WIDTH: f32 = 600.0;
pub const FIELD_HEIGHT: f32 = 400.0;
pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 60.0;
pub const BALL_SIZE: f32 = 8.0;
pub const BALL_SPEED: f32 = 5.0;
pub const PADDLE_SPEED: f32 = 8.0;
pub const WINNING_SCORE: u32 = 5;
pub const SPEED_UP: f32 = 1.1;
const TICK: Duration = Duration::from_micros(16_667);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

pub struct Pong {
    left_y: f32,
    right_y: f32,
    ball_x: f32,
    ball_y: f32,
    ball_dx: f32,
    ball_dy: f32,
    left_score: u32,
    right_score: u32,
    winner: Option<Side>,
    status: Status,
    rng: ChaCha8Rng,
}

impl Pong {
    pub fn new() -> Self {
        Self::with_rng(make_rng(None))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(make_rng(Some(seed)))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        let centre = FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0;
        Self {
            left_y: centre,
            right_y: centre,
            ball_x: FIELD_WIDTH / 2.0,
            ball_y: FIELD_HEIGHT / 2.0,
            ball_dx: BALL_SPEED,
            ball_dy: BALL_SPEED,
            left_score: 0,
            right_score: 0,
            winner: None,
            status: Status::new(),
            rng,
        }
    }

    pub fn paddles(&self) -> (f32, f32) {
        (self.left_y, self.right_y)
    }

    pub fn ball(&self) -> (f32, f32) {
        (self.ball_x, self.ball_y)
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.ball_dx, self.ball_dy)
    }

    pub fn speed(&self) -> f32 {
        self.ball_dx.hypot(self.ball_dy)
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.left_score, self.right_score)
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    fn move_paddle(&mut self, side: Side, dy: f32) {
        let paddle = match side {
            Side::Left => &mut self.left_y,
            Side::Right => &mut self.right_y,
        };
        *paddle = (*paddle + dy).clamp(0.0, FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    fn serve(&mut self) {
        self.ball_x = FIELD_WIDTH / 2.0;
        self.ball_y = FIELD_HEIGHT / 2.0;
        self.ball_dx = if self.rng.gen_bool(0.5) { BALL_SPEED } else { -BALL_SPEED };
        self.ball_dy = if self.rng.gen_bool(0.5) { BALL_SPEED } else { -BALL_SPEED };
    }

    fn touches_paddle(&self) -> bool {
        let left = self.ball_dx < 0.0
            && self.ball_x <= PADDLE_WIDTH + BALL_SIZE
            && self.ball_y >= self.left_y
            && self.ball_y <= self.left_y + PADDLE_HEIGHT;
        let right = self.ball_dx > 0.0
            && self.ball_x >= FIELD_WIDTH - PADDLE_WIDTH - BALL_SIZE
            && self.ball_y >= self.right_y
            && self.ball_y <= self.right_y + PADDLE_HEIGHT;
        left || right
    }

    fn point_for(&mut self, side: Side) {
        let score = match side {
            Side::Left => &mut self.left_score,
            Side::Right => &mut self.right_score,
        };
        *score += 1;
        if *score >= WINNING_SCORE {
            self.winner = Some(side);
            self.status.finish();
            info!(winner = ?side, left = self.left_score, right = self.right_score, "pong match over");
            return;
        }
        self.serve();
    }

    fn move_ball(&mut self) {
        self.ball_x += self.ball_dx;
        self.ball_y += self.ball_dy;

        if self.ball_y <= BALL_SIZE {
            self.ball_dy = self.ball_dy.abs();
        } else if self.ball_y >= FIELD_HEIGHT - BALL_SIZE {
            self.ball_dy = -self.ball_dy.abs();
        }

        if self.touches_paddle() {
            self.ball_dx = -self.ball_dx * SPEED_UP;
            self.ball_dy *= SPEED_UP;
        }

        if self.ball_x <= 0.0 {
            self.point_for(Side::Right);
        } else if self.ball_x >= FIELD_WIDTH {
            self.point_for(Side::Left);
        }
    }
}

impl Default for Pong {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Pong {
    fn name(&self) -> &'static str {
        "Pong"
    }

    fn update(&mut self) {
        if !self.status.is_running() {
            return;
        }
        self.move_ball();
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
            KeyCode::Char('w') | KeyCode::Char('W') => self.move_paddle(Side::Left, -PADDLE_SPEED),
            KeyCode::Char('s') | KeyCode::Char('S') => self.move_paddle(Side::Left, PADDLE_SPEED),
            KeyCode::Up => self.move_paddle(Side::Right, -PADDLE_SPEED),
            KeyCode::Down => self.move_paddle(Side::Right, PADDLE_SPEED),
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
        let centre = FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0;
        self.left_y = centre;
        self.right_y = centre;
        self.left_score = 0;
        self.right_score = 0;
        self.winner = None;
        self.status = Status::new();
        self.serve();
    }

    /// The leading side's points. Per-side points come from `scores()`.
    fn get_score(&self) -> u32 {
        self.left_score.max(self.right_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paddle_hits_scale_speed() {
        let mut pong = Pong::with_seed(1);
        // flat rally: no vertical motion, paddles lined up with the ball
        pong.ball_dy = 0.0;
        pong.ball_y = FIELD_HEIGHT / 2.0;
        let initial_flat = pong.speed();
        let mut hits = 0;
        for _ in 0..2000 {
            let before = pong.ball_dx.signum();
            pong.update();
            if pong.ball_dx.signum() != before {
                hits += 1;
                let expected = initial_flat * SPEED_UP.powi(hits);
                assert!((pong.speed() - expected).abs() < 1e-3);
            }
            if hits == 4 {
                break;
            }
        }
        assert_eq!(hits, 4);
        assert_eq!(pong.scores(), (0, 0));
    }

    #[test]
    fn paddle_is_clamped() {
        let mut pong = Pong::with_seed(1);
        for _ in 0..100 {
            pong.handle_input(Input::Key(KeyCode::Char('w')));
            pong.handle_input(Input::Key(KeyCode::Down));
        }
        assert_eq!(pong.paddles(), (0.0, FIELD_HEIGHT - PADDLE_HEIGHT));
    }

    #[test]
    fn ball_reflects_off_floor() {
        let mut pong = Pong::with_seed(1);
        pong.ball_x = FIELD_WIDTH / 2.0;
        pong.ball_y = FIELD_HEIGHT - BALL_SIZE - 1.0;
        pong.ball_dy = BALL_SPEED;
        pong.update();
        assert!(pong.velocity().1 < 0.0);
    }

    #[test]
    fn fifth_point_ends_the_match() {
        let mut pong = Pong::with_seed(2);
        pong.left_score = WINNING_SCORE - 1;
        pong.ball_x = FIELD_WIDTH - 1.0;
        pong.ball_dx = BALL_SPEED;
        pong.right_y = 0.0;
        pong.ball_y = FIELD_HEIGHT / 2.0;
        pong.ball_dy = 0.0;
        pong.update();
        assert!(pong.is_game_over());
        assert_eq!(pong.winner(), Some(Side::Left));
        assert_eq!(pong.scores(), (WINNING_SCORE, 0));
    }

    #[test]
    fn missed_ball_serves_from_centre() {
        let mut pong = Pong::with_seed(3);
        pong.ball_x = 2.0;
        pong.ball_dx = -BALL_SPEED;
        pong.left_y = FIELD_HEIGHT - PADDLE_HEIGHT;
        pong.ball_y = 50.0;
        pong.update();
        assert_eq!(pong.scores(), (0, 1));
        assert_eq!(pong.ball(), (FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0));
        assert_eq!(pong.speed(), BALL_SPEED.hypot(BALL_SPEED));
        assert!(!pong.is_game_over());
    }
}
