mod steam_id_tests;

use crate::cache::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that only moves when told to
pub(crate) struct ManualClock(AtomicI64);

impl ManualClock {
    pub(crate) fn new(now: i64) -> Self {
        Self(AtomicI64::new(now))
    }

    pub(crate) fn advance(&self, seconds: i64) {
        self.0.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
