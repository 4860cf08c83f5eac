// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp sources.

use chrono::{DateTime, Utc};

/// Source of entry timestamps.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Manually driven clock for tests.
    #[derive(Debug, Clone)]
    pub struct FakeClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FakeClock {
        /// Starts at 2026-01-01T00:00:00Z.
        pub fn new() -> Self {
            let start = Utc
                .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default();
            Self::at(start)
        }

        pub fn at(now: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(now)),
            }
        }

        pub fn set(&self, now: DateTime<Utc>) {
            *self.now.lock() = now;
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock();
            *now += by;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock()
        }
    }
}
