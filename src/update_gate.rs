//! Cache-backed gate deciding when a profile may be refreshed from Steam
//!
//! A refresh writes `profile_<small id>` with the current unix time. Until the
//! update window has elapsed the gate answers "not due". Two callers checking
//! the same id at once may both see "due"; the gate only debounces.

use crate::cache::{Clock, ProfileCache, SystemClock};
use crate::config::SteamConfig;
use crate::error::SteamError;
use crate::steam_id::SmallId;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct UpdateGate {
    cache: Arc<dyn ProfileCache>,
    clock: Arc<dyn Clock>,
    window: Duration,
    ttl_minutes: u64,
}

impl UpdateGate {
    pub fn new(config: &SteamConfig, cache: Arc<dyn ProfileCache>) -> Self {
        Self::with_clock(config, cache, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &SteamConfig,
        cache: Arc<dyn ProfileCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache,
            clock,
            window: config.update_window,
            ttl_minutes: config.update_window_minutes(),
        }
    }

    fn window_secs(&self) -> i64 {
        i64::try_from(self.window.as_secs()).unwrap_or(i64::MAX)
    }

    /// Whether the profile's last recorded update is old enough for another one
    pub async fn can_update(&self, small_id: SmallId) -> Result<bool, SteamError> {
        let key = small_id.cache_key();

        if !self.cache.has(&key).await? {
            return Ok(true);
        }

        // The entry may expire between `has` and `get`
        let Some(updated_at) = self.cache.get(&key).await? else {
            return Ok(true);
        };

        let now = self.clock.now();
        if updated_at.saturating_add(self.window_secs()) > now {
            debug!("Profile {} updated at {}, not due yet", small_id, updated_at);
            return Ok(false);
        }

        Ok(true)
    }

    /// Record that the profile was refreshed now
    pub async fn set_update(&self, small_id: SmallId) -> Result<(), SteamError> {
        let now = self.clock.now();
        self.cache
            .put(&small_id.cache_key(), now, self.ttl_minutes)
            .await?;
        debug!("Recorded update of profile {} at {}", small_id, now);
        Ok(())
    }
}
