//! Console front-end settings.
//!
//! Read from a TOML file named by the first command-line argument or by the
//! `PLUM_CHECKERS_CONFIG` environment variable. Without either, defaults apply.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::game_state::checkers_types::CheckersGame;

pub const CONFIG_ENV_VAR: &str = "PLUM_CHECKERS_CONFIG";

pub const USAGE: &str = "usage: plum_checkers [CONFIG.toml]

Plays English draughts over stdin/stdout; type `help` once running.
The config path may also come from PLUM_CHECKERS_CONFIG. RUST_LOG overrides log_filter.";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(ConsoleConfig),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Position string to start from instead of the opening.
    pub start_position: Option<String>,
    /// Print the board after every accepted move.
    pub show_board_after_move: bool,
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            start_position: None,
            show_board_after_move: false,
            log_filter: "warn".to_owned(),
        }
    }
}

impl ConsoleConfig {
    /// `-h`/`--help` asks for usage; any other first argument is a config path.
    pub fn resolve(mut args: impl Iterator<Item = String>) -> Result<Invocation, ConfigError> {
        let path = match args.next() {
            Some(arg) if arg == "-h" || arg == "--help" => return Ok(Invocation::Help),
            Some(arg) => Some(arg),
            None => std::env::var(CONFIG_ENV_VAR).ok(),
        };
        let config = match path {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        Ok(Invocation::Run(config))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_owned(),
            source,
        })?;
        config.build_game()?;
        Ok(config)
    }

    pub fn build_game(&self) -> Result<CheckersGame, ConfigError> {
        match &self.start_position {
            Some(position) => Ok(CheckersGame::from_position_str(position)?),
            None => Ok(CheckersGame::new()),
        }
    }
}
