//! Client configuration for the scoring shell.

use crate::submit::SubmitDelays;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "PONG_SERVER_URL";
/// Environment variable overriding the player name.
pub const PLAYER_ENV: &str = "PONG_PLAYER";

/// Configuration for a scoring client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the scoring server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Player the client submits turns for.
    #[serde(default = "default_player")]
    player: String,

    /// Pause after the last cup of a center shot, in milliseconds.
    #[serde(default = "default_hit_delay_ms")]
    hit_delay_ms: u64,

    /// Pause after a rim or miss, in milliseconds.
    #[serde(default = "default_outcome_delay_ms")]
    outcome_delay_ms: u64,

    /// Pause after a format change, in milliseconds.
    #[serde(default = "default_format_change_delay_ms")]
    format_change_delay_ms: u64,

    /// Try the JSON endpoint `{server_url}/api/turn/{player}` before the form
    /// post. Off by default; the scoring server only serves `/add/{player}`
    /// unless that endpoint is deployed.
    #[serde(default = "default_prefer_async")]
    prefer_async: bool,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_player() -> String {
    "player1".to_string()
}

fn default_hit_delay_ms() -> u64 {
    300
}

fn default_outcome_delay_ms() -> u64 {
    500
}

fn default_format_change_delay_ms() -> u64 {
    1200
}

fn default_prefer_async() -> bool {
    false
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            player: default_player(),
            hit_delay_ms: default_hit_delay_ms(),
            outcome_delay_ms: default_outcome_delay_ms(),
            format_change_delay_ms: default_format_change_delay_ms(),
            prefer_async: default_prefer_async(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(server_url = %config.server_url, player = %config.player, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `PONG_SERVER_URL` and `PONG_PLAYER` if set.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(SERVER_URL_ENV).ok(),
            std::env::var(PLAYER_ENV).ok(),
        )
    }

    /// Replaces the server URL and player where given. Empty values are ignored.
    pub fn with_overrides(mut self, server_url: Option<String>, player: Option<String>) -> Self {
        if let Some(url) = server_url.filter(|u| !u.trim().is_empty()) {
            debug!(server_url = %url, "Server URL overridden");
            self.server_url = url;
        }
        if let Some(player) = player.filter(|p| !p.trim().is_empty()) {
            debug!(player = %player, "Player overridden");
            self.player = player;
        }
        self
    }

    /// Cosmetic submission delays.
    pub fn delays(&self) -> SubmitDelays {
        SubmitDelays {
            hit: Duration::from_millis(self.hit_delay_ms),
            outcome: Duration::from_millis(self.outcome_delay_ms),
            format_change: Duration::from_millis(self.format_change_delay_ms),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.trim().is_empty() {
            return Err(ConfigError::new("server_url must not be empty".to_string()));
        }
        if self.player.trim().is_empty() {
            return Err(ConfigError::new("player must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
