use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use pocket_arcade::app::App;
use pocket_arcade::config::{Cli, Config};
use pocket_arcade::event::{Event, EventHandler};
use pocket_arcade::terminal::TerminalGuard;
use pocket_arcade::{logging, ui};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
    let config = Cli::parse().load_config()?;
    logging::init(config.log_file.as_deref())?;
    info!(frame_ms = config.frame_ms, seed = ?config.seed, "starting");

    let result = {
        let _guard = TerminalGuard::enter()?;
        Terminal::new(CrosstermBackend::new(io::stdout()))
            .context("creating terminal")
            .and_then(|mut terminal| {
                terminal.clear()?;
                run(&mut terminal, &config)
            })
    };

    info!("exiting");
    result.context("running arcade")
}

fn run(terminal: &mut Term, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    let event_handler = EventHandler::new(config.frame_ms);

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        match event_handler.next()? {
            Event::Tick => {}
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
        }
        // each game ticks on its own clock
        app.on_tick();

        if app.should_quit {
            return Ok(());
        }
    }
}
