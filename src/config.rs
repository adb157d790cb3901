//! Configuration shared by the API client and the update gate

use std::env;
use std::time::Duration;

/// Seconds a profile stays fresh after an update
pub const DEFAULT_UPDATE_WINDOW: Duration = Duration::from_secs(3600);

/// Configuration for talking to the Steam Web API
#[derive(Clone)]
pub struct SteamConfig {
    /// Web API key, see https://steamcommunity.com/dev/apikey
    pub api_key: String,
    /// Base URL of the Web API host
    pub api_url: String,
    /// Base URL of the community site (aliases, XML profiles)
    pub community_url: String,
    /// Minimum time between two refreshes of the same profile
    pub update_window: Duration,
    /// Upper bound for a single request, connect through body
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "https://api.steampowered.com".to_string(),
            community_url: "https://steamcommunity.com".to_string(),
            update_window: DEFAULT_UPDATE_WINDOW,
            request_timeout: Duration::from_secs(10),
            user_agent: "SteamProfile/1.0".to_string(),
        }
    }
}

// The API key stays out of logs
impl std::fmt::Debug for SteamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("community_url", &self.community_url)
            .field("update_window", &self.update_window)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl SteamConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Build from `STEAM_*` environment variables. Only `STEAM_API_KEY` is required.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut config = Self::new(env::var("STEAM_API_KEY")?);

        if let Ok(url) = env::var("STEAM_API_URL") {
            config.api_url = url;
        }
        if let Ok(url) = env::var("STEAM_COMMUNITY_URL") {
            config.community_url = url;
        }
        if let Ok(secs) = env::var("STEAM_UPDATE_WINDOW_SECS") {
            config.update_window = Duration::from_secs(secs.parse()?);
        }
        if let Ok(secs) = env::var("STEAM_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs.parse()?);
        }

        Ok(config)
    }

    /// Update window expressed in the cache's TTL unit, rounded up so the
    /// record never expires before the window closes
    pub fn update_window_minutes(&self) -> u64 {
        self.update_window.as_secs().div_ceil(60).max(1)
    }
}
