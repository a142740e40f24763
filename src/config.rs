//! Client configuration.
//!
//! Consolidates the two endpoint settings — the realtime channel URL and
//! the query-service base URL — with environment variable reads in one
//! place. Neither endpoint is dialed by this crate; the transport binding
//! and the query layer take these values at startup.

/// Default realtime channel endpoint.
pub const DEFAULT_CHANNEL_URL: &str = "ws://127.0.0.1:4000";

/// Default query-service base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:4000";

/// Endpoint configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Realtime channel endpoint (`ws://` or `wss://`).
    pub channel_url: String,

    /// Base URL for leaderboard/stats queries (`http://` or `https://`).
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            channel_url: DEFAULT_CHANNEL_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `FOURLINE_CHANNEL_URL` and
    /// `FOURLINE_API_URL`, falling back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            channel_url: env_or("FOURLINE_CHANNEL_URL", DEFAULT_CHANNEL_URL),
            api_base_url: env_or("FOURLINE_API_URL", DEFAULT_API_BASE_URL),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate endpoint schemes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.channel_url.starts_with("ws://") && !self.channel_url.starts_with("wss://") {
            return Err(ConfigError::Invalid {
                var: "FOURLINE_CHANNEL_URL",
                reason: "Must start with ws:// or wss://".to_string(),
            });
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                var: "FOURLINE_API_URL",
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    /// URL for `GET /leaderboard`.
    pub fn leaderboard_url(&self) -> String {
        format!("{}/leaderboard", self.api_base_url.trim_end_matches('/'))
    }

    /// URL for `GET /leaderboard/player/{username}`.
    pub fn player_stats_url(&self, username: &str) -> String {
        format!(
            "{}/leaderboard/player/{}",
            self.api_base_url.trim_end_matches('/'),
            username
        )
    }
}

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { var: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { var, reason } => {
                write!(f, "Invalid configuration for {}: {}", var, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read an environment variable with a default fallback.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
