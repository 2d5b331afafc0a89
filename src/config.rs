use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// 実行時設定 (`tictactoe.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pause after each committed move, in milliseconds.
    pub move_delay_ms: u64,
    /// Let the minimax player pick a random cell on an empty board.
    pub opening_shortcut: bool,
    pub print_game: bool,
}

impl GameConfig {
    pub const DEFAULT_PATH: &'static str = "tictactoe.json";

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load_or_default_from(Self::DEFAULT_PATH)
    }

    /// A missing file silently yields the defaults; an unreadable or
    /// malformed one is reported before falling back.
    pub fn load_or_default_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring config file");
            Self::default()
        })
    }

    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            move_delay_ms: 1000,
            opening_shortcut: true,
            print_game: true,
        }
    }
}
