//! In-process rewind quota counter.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use mockable::Clock;

use crate::domain::UserId;
use crate::domain::ports::{RewindQuotaStore, RewindQuotaStoreError};

#[derive(Debug, Clone, Copy)]
struct Counter {
    value: u32,
    expires_at: DateTime<Utc>,
}

/// Expiring counter held in process memory.
///
/// Expiry is evaluated against the injected clock, so tests can cross a
/// midnight boundary without waiting for wall time. Each increment runs
/// under one mutex acquisition, matching the port's atomicity contract.
pub struct InMemoryRewindQuotaStore {
    clock: Arc<dyn Clock>,
    counters: Mutex<HashMap<(UserId, NaiveDate), Counter>>,
}

impl InMemoryRewindQuotaStore {
    /// Create an empty counter store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            counters: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RewindQuotaStore for InMemoryRewindQuotaStore {
    async fn count(
        &self,
        user_id: UserId,
        day: NaiveDate,
    ) -> Result<u32, RewindQuotaStoreError> {
        let now = self.clock.utc();
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(counters
            .get(&(user_id, day))
            .filter(|counter| counter.expires_at > now)
            .map_or(0, |counter| counter.value))
    }

    async fn increment(
        &self,
        user_id: UserId,
        day: NaiveDate,
        ttl_seconds: u64,
    ) -> Result<u32, RewindQuotaStoreError> {
        let now = self.clock.utc();
        let ttl = Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX));
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = counters.entry((user_id, day)).or_insert(Counter {
            value: 0,
            expires_at: now,
        });
        if entry.expires_at <= now {
            entry.value = 0;
        }
        entry.value = entry.value.saturating_add(1);
        entry.expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        Ok(entry.value)
    }
}
