use std::time::Duration;

use crossterm::event::KeyCode;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::games::{common_action, make_rng, Common, Game, Input, Status};

pub const GRID_WIDTH: i32 = 10;
pub const GRID_HEIGHT: i32 = 20;
const SPAWN: (i32, i32) = (GRID_WIDTH / 2, 1);
const INITIAL_DROP_MS: f64 = 1000.0;
const MIN_DROP_MS: f64 = 100.0;
const DROP_FACTOR: f64 = 0.8;
const LINE_POINTS: u32 = 100;
const LEVEL_STEP: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn offsets(self) -> [(i32, i32); 4] {
        match self {
            PieceKind::I => [(0, 0), (0, -1), (0, 1), (0, 2)],
            PieceKind::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            PieceKind::T => [(0, 0), (-1, 0), (1, 0), (0, 1)],
            PieceKind::S => [(0, 0), (-1, 0), (0, 1), (1, 1)],
            PieceKind::Z => [(0, 0), (1, 0), (0, 1), (-1, 1)],
            PieceKind::J => [(0, 0), (0, -1), (0, 1), (-1, 1)],
            PieceKind::L => [(0, 0), (0, -1), (0, 1), (1, 1)],
        }
    }

    pub fn label(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// The falling piece: relative offsets around an absolute origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub kind: PieceKind,
    pub cells: [(i32, i32); 4],
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            cells: kind.offsets(),
            x: SPAWN.0,
            y: SPAWN.1,
        }
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// Quarter turn about the local origin: (x, y) -> (-y, x).
    pub fn rotated(&self) -> Self {
        Self {
            cells: self.cells.map(|(x, y)| (-y, x)),
            ..self.clone()
        }
    }

    pub fn absolute(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().map(move |&(cx, cy)| (self.x + cx, self.y + cy))
    }
}

pub type Row = [Option<PieceKind>; GRID_WIDTH as usize];

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            rows: vec![[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, x: i32, y: i32) -> Option<PieceKind> {
        if x < 0 || y < 0 || x >= GRID_WIDTH || y >= GRID_HEIGHT {
            return None;
        }
        self.rows[y as usize][x as usize]
    }

    pub fn fits(&self, piece: &Piece) -> bool {
        piece.absolute().all(|(x, y)| {
            (0..GRID_WIDTH).contains(&x)
                && (0..GRID_HEIGHT).contains(&y)
                && self.rows[y as usize][x as usize].is_none()
        })
    }

    /// Commits the piece to the grid. Cells above the top row are discarded.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.absolute() {
            if y < 0 || y >= GRID_HEIGHT || x < 0 || x >= GRID_WIDTH {
                continue;
            }
            self.rows[y as usize][x as usize] = Some(piece.kind);
        }
    }

    /// Removes full rows and refills from the top. Returns the number cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let before = self.rows.len();
        self.rows.retain(|row| row.iter().any(Option::is_none));
        let cleared = before - self.rows.len();
        for _ in 0..cleared {
            self.rows.insert(0, [None; GRID_WIDTH as usize]);
        }
        cleared as u32
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Tetris {
    grid: Grid,
    piece: Piece,
    score: u32,
    level: u32,
    drop_ms: f64,
    lines: u32,
    status: Status,
    rng: ChaCha8Rng,
}

impl Tetris {
    pub fn new() -> Self {
        Self::with_rng(make_rng(None))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(make_rng(Some(seed)))
    }

    fn with_rng(mut rng: ChaCha8Rng) -> Self {
        let piece = Piece::spawn(random_kind(&mut rng));
        Self {
            grid: Grid::new(),
            piece,
            score: 0,
            level: 1,
            drop_ms: INITIAL_DROP_MS,
            lines: 0,
            status: Status::new(),
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval(&self) -> Duration {
        Duration::from_nanos((self.drop_ms * 1_000_000.0).round() as u64)
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let moved = self.piece.shifted(dx, dy);
        if self.grid.fits(&moved) {
            self.piece = moved;
            true
        } else {
            false
        }
    }

    fn rotate(&mut self) {
        let rotated = self.piece.rotated();
        if self.grid.fits(&rotated) {
            self.piece = rotated;
        }
    }

    /// Moves the piece one row down, or locks it and spawns the next one.
    /// Returns false when the piece locked.
    fn step_down(&mut self) -> bool {
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    fn lock_piece(&mut self) {
        self.grid.merge(&self.piece);
        let cleared = self.grid.clear_lines();
        if cleared > 0 {
            self.award(cleared);
        }
        self.piece = Piece::spawn(random_kind(&mut self.rng));
        if !self.grid.fits(&self.piece) {
            self.status.finish();
            info!(score = self.score, level = self.level, "tetris stack topped out");
        }
    }

    fn award(&mut self, cleared: u32) {
        self.lines += cleared;
        self.score += LINE_POINTS * cleared * self.level;
        debug!(cleared, score = self.score, "lines cleared");
        if self.score > self.level * LEVEL_STEP {
            self.level += 1;
            self.drop_ms = (self.drop_ms * DROP_FACTOR).max(MIN_DROP_MS);
            info!(level = self.level, drop_ms = self.drop_ms, "tetris level up");
        }
    }

    fn hard_drop(&mut self) {
        while self.step_down() {}
    }
}

fn random_kind(rng: &mut ChaCha8Rng) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
}

impl Default for Tetris {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Tetris {
    fn name(&self) -> &'static str {
        "Tetris"
    }

    fn update(&mut self) {
        if !self.status.is_running() {
            return;
        }
        self.step_down();
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
            KeyCode::Left => {
                self.try_move(-1, 0);
            }
            KeyCode::Right => {
                self.try_move(1, 0);
            }
            KeyCode::Down => {
                self.try_move(0, 1);
            }
            KeyCode::Up => self.rotate(),
            KeyCode::Char(' ') => self.hard_drop(),
            _ => {}
        }
    }

    fn tick_interval(&self) -> Duration {
        self.drop_interval()
    }

    fn status(&self) -> Status {
        self.status
    }

    fn reset(&mut self) {
        self.grid = Grid::new();
        self.piece = Piece::spawn(random_kind(&mut self.rng));
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_ms = INITIAL_DROP_MS;
        self.status = Status::new();
    }

    fn get_score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, y: usize) {
        grid.rows[y] = [Some(PieceKind::O); GRID_WIDTH as usize];
    }

    #[test]
    fn four_rotations_restore_every_kind() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind);
            let back = piece.rotated().rotated().rotated().rotated();
            assert_eq!(back.cells, piece.cells, "{kind:?}");
        }
    }

    #[test]
    fn rotation_blocked_by_wall() {
        let mut game = Tetris::with_seed(1);
        game.piece = Piece {
            kind: PieceKind::I,
            cells: PieceKind::I.offsets(),
            x: 0,
            y: 5,
        };
        // horizontal I would need columns -2..=1
        game.rotate();
        assert_eq!(game.piece.cells, PieceKind::I.offsets());
    }

    #[test]
    fn fits_rejects_out_of_bounds_and_filled() {
        let mut grid = Grid::new();
        let piece = Piece::spawn(PieceKind::O);
        assert!(grid.fits(&piece));
        assert!(!grid.fits(&piece.shifted(0, -2)));
        assert!(!grid.fits(&piece.shifted(5, 0)));
        grid.rows[2][5] = Some(PieceKind::T);
        assert!(!grid.fits(&piece));
    }

    #[test]
    fn clearing_two_rows_scores_by_level() {
        let mut game = Tetris::with_seed(5);
        game.level = 2;
        fill_row(&mut game.grid, 19);
        fill_row(&mut game.grid, 17);
        game.grid.rows[18][0] = Some(PieceKind::L);

        game.award_and_clear();

        assert_eq!(game.score, 400);
        assert_eq!(game.grid.rows().len(), GRID_HEIGHT as usize);
        assert_eq!(game.grid.rows[19][0], Some(PieceKind::L));
        assert!(game.grid.rows[..19].iter().all(|r| r.iter().all(Option::is_none)));
    }

    #[test]
    fn merge_then_clear_leaves_no_full_rows() {
        let mut game = Tetris::with_seed(9);
        for x in 0..GRID_WIDTH as usize {
            if x != 4 && x != 5 {
                game.grid.rows[19][x] = Some(PieceKind::J);
                game.grid.rows[18][x] = Some(PieceKind::J);
            }
        }
        game.piece = Piece {
            kind: PieceKind::O,
            cells: PieceKind::O.offsets(),
            x: 4,
            y: 18,
        };
        game.update();
        assert_eq!(game.score, 200);
        assert_eq!(game.lines(), 2);
        for row in game.grid.rows() {
            assert_eq!(row.len(), GRID_WIDTH as usize);
            assert!(row.iter().any(Option::is_none));
        }
    }

    #[test]
    fn level_up_shrinks_drop_interval() {
        let mut game = Tetris::with_seed(2);
        game.score = 950;
        game.award(1);
        assert_eq!(game.score, 1050);
        assert_eq!(game.level, 2);
        assert_eq!(game.drop_interval(), Duration::from_millis(800));
    }

    #[test]
    fn drop_interval_is_floored() {
        let mut game = Tetris::with_seed(2);
        game.drop_ms = 110.0;
        game.score = 5000;
        game.award(1);
        assert_eq!(game.drop_interval(), Duration::from_millis(100));
    }

    #[test]
    fn fractional_drop_interval_is_kept() {
        let mut game = Tetris::with_seed(2);
        game.level = 4;
        game.drop_ms = 512.0;
        game.score = 4000;
        game.award(1);
        assert_eq!(game.level, 5);
        assert_eq!(game.drop_interval(), Duration::from_micros(409_600));
    }

    #[test]
    fn hard_drop_locks_on_the_floor() {
        let mut game = Tetris::with_seed(4);
        let kind = game.piece.kind;
        game.handle_input(Input::Key(KeyCode::Char(' ')));
        let filled: usize = game
            .grid
            .rows()
            .iter()
            .map(|r| r.iter().filter(|c| c.is_some()).count())
            .sum();
        assert_eq!(filled, 4);
        assert!(game.grid.rows[19].iter().any(|c| *c == Some(kind)));
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut game = Tetris::with_seed(8);
        for y in 0..4 {
            for x in 2..GRID_WIDTH as usize {
                game.grid.rows[y][x] = Some(PieceKind::Z);
            }
        }
        game.piece = Piece {
            kind: PieceKind::O,
            cells: PieceKind::O.offsets(),
            x: 0,
            y: 18,
        };
        game.update();
        assert!(game.is_game_over());
        let grid = game.grid.clone();
        game.update();
        assert_eq!(game.grid, grid);
    }

    #[test]
    fn keys_ignored_while_paused() {
        let mut game = Tetris::with_seed(4);
        let start = game.piece.clone();
        game.handle_input(Input::Key(KeyCode::Char('p')));
        game.handle_input(Input::Key(KeyCode::Left));
        game.update();
        assert_eq!(game.piece, start);
        game.handle_input(Input::Key(KeyCode::Char('p')));
        game.handle_input(Input::Key(KeyCode::Left));
        assert_eq!(game.piece.x, start.x - 1);
    }

    impl Tetris {
        fn award_and_clear(&mut self) {
            let cleared = self.grid.clear_lines();
            self.award(cleared);
        }
    }
}
