//! Expiring key-value cache collaborator used by the update gate

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Profile cache unavailable: {0}")]
pub struct CacheError(pub String);

/// Source of the current unix time in seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Key-value store with per-entry expiry, measured in minutes
#[async_trait]
pub trait ProfileCache: Send + Sync {
    async fn has(&self, key: &str) -> Result<bool, CacheError>;

    async fn get(&self, key: &str) -> Result<Option<i64>, CacheError>;

    async fn put(&self, key: &str, value: i64, ttl_minutes: u64) -> Result<(), CacheError>;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: i64,
    expires_at: i64,
}

/// Process-local cache. Expired entries are dropped lazily on access.
pub struct MemoryProfileCache {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .lock()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live_value(&self, key: &str) -> Option<i64> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}

impl Default for MemoryProfileCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileCache for MemoryProfileCache {
    async fn has(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.live_value(key).is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<i64>, CacheError> {
        Ok(self.live_value(key))
    }

    async fn put(&self, key: &str, value: i64, ttl_minutes: u64) -> Result<(), CacheError> {
        let ttl_seconds = i64::try_from(ttl_minutes.saturating_mul(60)).unwrap_or(i64::MAX);
        let expires_at = self.clock.now().saturating_add(ttl_seconds);
        self.entries
            .lock()
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }
}
