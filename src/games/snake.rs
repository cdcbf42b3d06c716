use std::time::Duration;

use crossterm::event::KeyCode;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::games::{common_action, make_rng, Common, Game, Input, Status};

pub const GRID_SIZE: i32 = 20;
const TICK: Duration = Duration::from_millis(100);
const START: Cell = Cell { x: 10, y: 10 };
const FIRST_FOOD: Cell = Cell { x: 15, y: 15 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

pub struct Snake {
    body: Vec<Cell>,
    food: Cell,
    direction: Direction,
    // direction of the last completed move; reversal is checked against it
    heading: Direction,
    score: u32,
    status: Status,
    rng: ChaCha8Rng,
}

impl Snake {
    pub fn new() -> Self {
        Self::with_rng(make_rng(None))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(make_rng(Some(seed)))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            body: vec![START],
            food: FIRST_FOOD,
            direction: Direction::Right,
            heading: Direction::Right,
            score: 0,
            status: Status::new(),
            rng,
        }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn steer(&mut self, dir: Direction) {
        if dir != self.heading.opposite() {
            self.direction = dir;
        }
    }

    fn hits_something(&self, head: Cell) -> bool {
        if head.x < 0 || head.x >= GRID_SIZE || head.y < 0 || head.y >= GRID_SIZE {
            return true;
        }
        self.body.iter().skip(1).any(|&seg| seg == head)
    }

    /// Places food on a uniformly chosen cell not covered by the body.
    fn place_food(&mut self) {
        let free: Vec<Cell> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell { x, y }))
            .filter(|c| !self.body.contains(c))
            .collect();
        if free.is_empty() {
            return;
        }
        self.food = free[self.rng.gen_range(0..free.len())];
    }

    fn advance(&mut self) {
        let (dx, dy) = self.direction.delta();
        let head = Cell {
            x: self.body[0].x + dx,
            y: self.body[0].y + dy,
        };

        if self.hits_something(head) {
            self.status.finish();
            info!(score = self.score, length = self.body.len(), "snake crashed");
            return;
        }

        self.heading = self.direction;
        self.body.insert(0, head);
        if head == self.food {
            self.score += 1;
            self.place_food();
        } else {
            self.body.pop();
        }
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Snake {
    fn name(&self) -> &'static str {
        "Snake"
    }

    fn update(&mut self) {
        if !self.status.is_running() {
            return;
        }
        self.advance();
    }

    fn handle_input(&mut self, input: Input) {
        let Input::Key(key) = input else { return };
        match common_action(key, &self.status) {
            Some(Common::Pause) => return self.status.toggle_pause(),
            Some(Common::Help) => return self.status.toggle_help(),
            Some(Common::Reset) => return self.reset(),
            None => {}
        }
        match key {
            KeyCode::Char(' ') => self.status.toggle_pause(),
            KeyCode::Up => self.steer(Direction::Up),
            KeyCode::Down => self.steer(Direction::Down),
            KeyCode::Left => self.steer(Direction::Left),
            KeyCode::Right => self.steer(Direction::Right),
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
        self.body = vec![START];
        self.direction = Direction::Right;
        self.heading = Direction::Right;
        self.score = 0;
        self.status = Status::new();
        self.place_food();
    }

    fn get_score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::with_seed(1);
        snake.handle_input(Input::Key(KeyCode::Left));
        assert_eq!(snake.direction(), Direction::Right);
        snake.handle_input(Input::Key(KeyCode::Up));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn quick_turns_cannot_reverse_before_a_move() {
        let mut snake = Snake::with_seed(1);
        snake.steer(Direction::Up);
        snake.steer(Direction::Left);
        // heading is still Right, Left would fold the snake onto itself
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn eating_grows_by_one() {
        let mut snake = Snake::with_seed(7);
        snake.food = Cell { x: 11, y: 10 };
        snake.update();
        assert_eq!(snake.body().len(), 2);
        assert_eq!(snake.get_score(), 1);
        assert_eq!(snake.head(), Cell { x: 11, y: 10 });
        assert!(!snake.body().contains(&snake.food()));
    }

    #[test]
    fn wall_ends_the_game() {
        let mut snake = Snake::with_seed(3);
        snake.food = Cell { x: 0, y: 0 };
        for _ in 0..9 {
            snake.update();
        }
        assert_eq!(snake.head(), Cell { x: 19, y: 10 });
        assert!(!snake.is_game_over());
        snake.update();
        assert!(snake.is_game_over());
    }

    #[test]
    fn body_collision_ends_the_game() {
        let mut snake = Snake::with_seed(3);
        snake.body = vec![
            Cell { x: 5, y: 5 },
            Cell { x: 4, y: 5 },
            Cell { x: 4, y: 6 },
            Cell { x: 5, y: 6 },
            Cell { x: 6, y: 6 },
        ];
        snake.steer(Direction::Down);
        snake.update();
        assert!(snake.is_game_over());
    }

    #[test]
    fn food_avoids_the_body() {
        let mut snake = Snake::with_seed(11);
        snake.body = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell { x, y }))
            .filter(|c| *c != Cell { x: 3, y: 3 })
            .collect();
        snake.place_food();
        assert_eq!(snake.food(), Cell { x: 3, y: 3 });
    }

    #[test]
    fn paused_snake_does_not_move() {
        let mut snake = Snake::with_seed(1);
        snake.handle_input(Input::Key(KeyCode::Char(' ')));
        snake.update();
        assert_eq!(snake.head(), START);
        snake.handle_input(Input::Key(KeyCode::Char(' ')));
        snake.update();
        assert_eq!(snake.head(), Cell { x: 11, y: 10 });
    }
}
