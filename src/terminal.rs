use std::io;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::warn;

/// Owns raw mode and the alternate screen. Dropping it restores the terminal,
/// on early returns and unwinding panics alike.
pub struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let guard = Self { restore: restore_terminal };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
            .context("entering the alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            warn!(%err, "failed to restore the terminal");
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    raw
}

#[cfg(test)]
mod tests {
    use std::panic;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    static RESTORED: AtomicUsize = AtomicUsize::new(0);

    fn count_restore() -> io::Result<()> {
        RESTORED.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    #[test]
    fn restores_on_early_return_and_panic() {
        fn bail() -> Result<()> {
            let _guard = TerminalGuard { restore: count_restore };
            anyhow::bail!("terminal setup failed")
        }
        assert!(bail().is_err());
        assert_eq!(RESTORED.load(Ordering::SeqCst), 1);

        let outcome = panic::catch_unwind(|| {
            let _guard = TerminalGuard { restore: count_restore };
            panic!("frame loop blew up");
        });
        assert!(outcome.is_err());
        assert_eq!(RESTORED.load(Ordering::SeqCst), 2);
    }
}
