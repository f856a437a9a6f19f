//! Port for the append-only swipe ledger.
//!
//! The ledger is both the audit log of swipe decisions and the source of
//! truth for rewind. Adapters must keep per-actor entries totally ordered
//! by swipe time so "latest" is well defined.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{SwipeEvent, SwipeEventId, UserId};

/// Errors surfaced by swipe ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwipeLedgerError {
    /// Store connectivity failure.
    #[error("swipe ledger connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("swipe ledger query failed: {message}")]
    Query { message: String },
}

impl SwipeLedgerError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Append-only store of swipe events.
///
/// # Deletion contract
///
/// [`SwipeLedger::remove`] deletes at most the single event identified by
/// `(actor_id, event_id)` and reports whether anything was deleted. Rewind
/// relies on this conditional form: two racing rewinds fetch the same
/// latest event, but only one `remove` can return `true`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwipeLedger: Send + Sync {
    /// Append one event. Must be durable before returning.
    async fn append(&self, event: &SwipeEvent) -> Result<(), SwipeLedgerError>;

    /// The actor's most recent event, if any history exists.
    async fn latest_for_actor(
        &self,
        actor_id: UserId,
    ) -> Result<Option<SwipeEvent>, SwipeLedgerError>;

    /// Whether `actor_id` has a retained like or superlike aimed at
    /// `target_id`.
    async fn has_positive_swipe(
        &self,
        actor_id: UserId,
        target_id: UserId,
    ) -> Result<bool, SwipeLedgerError>;

    /// Every target the actor has swiped, regardless of swipe type.
    async fn swiped_targets(&self, actor_id: UserId)
    -> Result<HashSet<UserId>, SwipeLedgerError>;

    /// Delete the event with the given identity, returning whether it was
    /// still present.
    async fn remove(
        &self,
        actor_id: UserId,
        event_id: SwipeEventId,
    ) -> Result<bool, SwipeLedgerError>;
}

/// Fixture ledger with no history; appends and removals are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSwipeLedger;

#[async_trait]
impl SwipeLedger for FixtureSwipeLedger {
    async fn append(&self, _event: &SwipeEvent) -> Result<(), SwipeLedgerError> {
        Ok(())
    }

    async fn latest_for_actor(
        &self,
        _actor_id: UserId,
    ) -> Result<Option<SwipeEvent>, SwipeLedgerError> {
        Ok(None)
    }

    async fn has_positive_swipe(
        &self,
        _actor_id: UserId,
        _target_id: UserId,
    ) -> Result<bool, SwipeLedgerError> {
        Ok(false)
    }

    async fn swiped_targets(
        &self,
        _actor_id: UserId,
    ) -> Result<HashSet<UserId>, SwipeLedgerError> {
        Ok(HashSet::new())
    }

    async fn remove(
        &self,
        _actor_id: UserId,
        _event_id: SwipeEventId,
    ) -> Result<bool, SwipeLedgerError> {
        Ok(false)
    }
}
