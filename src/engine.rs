use std::time::{Duration, Instant};

use tracing::info;

use crate::games::{Game, Input};

/// Fires at most once per poll once its interval has elapsed. The overshoot past a deadline
/// carries into the next interval; a stall longer than one interval is dropped, not replayed.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    last: Instant,
}

impl Ticker {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        if now.saturating_duration_since(self.last) < interval {
            return false;
        }
        self.last += interval;
        if now.saturating_duration_since(self.last) >= interval {
            self.last = now;
        }
        true
    }

    pub fn restart(&mut self, now: Instant) {
        self.last = now;
    }
}

/// A mounted game together with its tick scheduler. Dropping the session tears both down.
pub struct Session<G: Game> {
    game: G,
    ticker: Ticker,
}

impl<G: Game> Session<G> {
    pub fn new(game: G, now: Instant) -> Self {
        info!(game = game.name(), "game mounted");
        Self {
            game,
            ticker: Ticker::new(now),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Runs one update if the game is running and its interval is due.
    /// Returns whether a tick happened.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.game.status().is_running() {
            // a suspended interval starts afresh on resume
            self.ticker.restart(now);
            return false;
        }
        if self.ticker.poll(now, self.game.tick_interval()) {
            self.game.update();
            return true;
        }
        false
    }

    pub fn input(&mut self, input: Input) {
        let was_over = self.game.is_game_over();
        self.game.handle_input(input);
        if was_over && !self.game.is_game_over() {
            info!(game = self.game.name(), "game restarted");
        }
    }
}

impl<G: Game> Drop for Session<G> {
    fn drop(&mut self) {
        info!(game = self.game.name(), score = self.game.get_score(), "game unmounted");
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::games::pong::Pong;
    use crate::games::snake::{Cell, Snake};
    use crate::games::space_invaders::SpaceInvaders;

    fn ticks_over(interval: Duration, frame: Duration, frames: u32) -> u32 {
        let start = Instant::now();
        let mut ticker = Ticker::new(start);
        (1..=frames)
            .filter(|&i| ticker.poll(start + frame * i, interval))
            .count() as u32
    }

    #[test]
    fn ticker_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(start);
        let step = Duration::from_millis(100);
        assert!(!ticker.poll(start + Duration::from_millis(99), step));
        assert!(ticker.poll(start + Duration::from_millis(100), step));
        // a long stall yields a single tick, not a burst
        assert!(ticker.poll(start + Duration::from_millis(1000), step));
        assert!(!ticker.poll(start + Duration::from_millis(1001), step));
    }

    #[test]
    fn overshoot_carries_into_the_next_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(start);
        let step = Duration::from_millis(50);
        assert!(ticker.poll(start + Duration::from_millis(64), step));
        // next deadline is 100 ms, not 114 ms
        assert!(ticker.poll(start + Duration::from_millis(100), step));
    }

    #[test]
    fn frame_rate_does_not_slow_the_game_rate() {
        let frame = Duration::from_millis(16);
        // ten seconds of 16 ms frames
        let pong = ticks_over(Pong::with_seed(1).tick_interval(), frame, 625);
        assert!((597..=600).contains(&pong), "pong ticked {pong} times");

        let invaders = ticks_over(SpaceInvaders::with_seed(1).tick_interval(), frame, 625);
        assert!((198..=200).contains(&invaders), "invaders ticked {invaders} times");
    }

    #[test]
    fn session_respects_the_game_interval() {
        let start = Instant::now();
        let mut session = Session::new(Snake::with_seed(1), start);
        assert!(!session.advance(start + Duration::from_millis(50)));
        assert!(session.advance(start + Duration::from_millis(100)));
        assert_eq!(session.game().head(), Cell { x: 11, y: 10 });
    }

    #[test]
    fn paused_session_does_not_tick() {
        let start = Instant::now();
        let mut session = Session::new(Snake::with_seed(1), start);
        session.input(Input::Key(KeyCode::Char('p')));
        assert!(!session.advance(start + Duration::from_secs(5)));
        assert_eq!(session.game().head(), Cell { x: 10, y: 10 });

        session.input(Input::Key(KeyCode::Char('p')));
        let resumed = start + Duration::from_secs(5) + Duration::from_millis(10);
        assert!(!session.advance(resumed));
        assert!(session.advance(start + Duration::from_secs(5) + Duration::from_millis(100)));
    }
}
