//! Port for the per-user daily rewind counter.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::UserId;

/// Errors surfaced by rewind quota adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewindQuotaStoreError {
    /// Counter store connectivity failure.
    #[error("rewind quota store connection failed: {message}")]
    Connection { message: String },
    /// Command failed during execution.
    #[error("rewind quota store command failed: {message}")]
    Command { message: String },
}

impl RewindQuotaStoreError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for command failures.
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }
}

/// Expiring per-user, per-day counter backing the rewind limit.
///
/// # Atomicity contract
///
/// [`RewindQuotaStore::increment`] must apply the increment and the expiry
/// as one atomic step. Two rewinds racing past the limit check would
/// otherwise both record their use against a half-initialized counter.
/// The expiry is recomputed by the caller on every call (seconds left
/// until local midnight), not a fixed window from first use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewindQuotaStore: Send + Sync {
    /// Rewinds already recorded for the user in the given day bucket.
    /// Missing or expired counters read as zero.
    async fn count(&self, user_id: UserId, day: NaiveDate)
    -> Result<u32, RewindQuotaStoreError>;

    /// Atomically add one use and set the counter to expire after
    /// `ttl_seconds`, returning the new count.
    async fn increment(
        &self,
        user_id: UserId,
        day: NaiveDate,
        ttl_seconds: u64,
    ) -> Result<u32, RewindQuotaStoreError>;
}

/// Fixture store that always reads zero and forgets increments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRewindQuotaStore;

#[async_trait]
impl RewindQuotaStore for FixtureRewindQuotaStore {
    async fn count(
        &self,
        _user_id: UserId,
        _day: NaiveDate,
    ) -> Result<u32, RewindQuotaStoreError> {
        Ok(0)
    }

    async fn increment(
        &self,
        _user_id: UserId,
        _day: NaiveDate,
        _ttl_seconds: u64,
    ) -> Result<u32, RewindQuotaStoreError> {
        Ok(1)
    }
}
