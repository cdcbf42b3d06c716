use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "POCKET_ARCADE_CONFIG";
const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown game `{0}` (expected snake, tetris, pong, breakout or invaders)")]
    UnknownGame(String),
}

/// Command line of the `pocket-arcade` binary.
#[derive(Debug, Parser)]
#[command(name = "pocket-arcade", version, about = "Five classic arcade games in the terminal")]
pub struct Cli {
    /// JSON config file; built-in defaults apply when absent
    #[arg(long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        match &self.config {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Snake,
    Tetris,
    Pong,
    Breakout,
    SpaceInvaders,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Snake,
        GameKind::Tetris,
        GameKind::Pong,
        GameKind::Breakout,
        GameKind::SpaceInvaders,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::Tetris => "Tetris",
            GameKind::Pong => "Pong",
            GameKind::Breakout => "Breakout",
            GameKind::SpaceInvaders => "Invaders",
        }
    }
}

impl FromStr for GameKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snake" => Ok(GameKind::Snake),
            "tetris" => Ok(GameKind::Tetris),
            "pong" => Ok(GameKind::Pong),
            "breakout" => Ok(GameKind::Breakout),
            "invaders" | "space-invaders" | "space_invaders" => Ok(GameKind::SpaceInvaders),
            _ => Err(ConfigError::UnknownGame(s.to_string())),
        }
    }
}

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    frame_ms: Option<u64>,
    start_game: Option<String>,
    seed: Option<u64>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Period of the frame/input poll loop.
    pub frame_ms: u64,
    /// Game mounted at startup instead of the home screen.
    pub start_game: Option<GameKind>,
    /// Seeds every game's RNG when set.
    pub seed: Option<u64>,
    /// Logging is disabled when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_ms: DEFAULT_FRAME_MS,
            start_game: None,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let start_game = raw.start_game.as_deref().map(str::parse).transpose()?;
        Ok(Self {
            frame_ms: raw.frame_ms.unwrap_or(DEFAULT_FRAME_MS).max(1),
            start_game,
            seed: raw.seed,
            log_file: raw.log_file,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }
}
