//! Port for the symmetric friend/match relation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::FriendPair;

/// Errors surfaced by friend relation adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FriendRepositoryError {
    /// Store connectivity failure.
    #[error("friend repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("friend repository query failed: {message}")]
    Query { message: String },
}

impl FriendRepositoryError {
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

/// Storage for mutual matches.
///
/// Both mutations are idempotent: creating an existing relation and
/// removing an absent one are no-ops, never errors. [`FriendPair`] already
/// normalizes member order, so adapters need no symmetry handling of their
/// own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// Record the pair as friends (no-op when already friends).
    async fn make_friends(&self, pair: FriendPair) -> Result<(), FriendRepositoryError>;

    /// Dissolve the friendship (no-op when none exists).
    async fn break_off(&self, pair: FriendPair) -> Result<(), FriendRepositoryError>;

    /// Whether the pair is currently matched.
    async fn are_friends(&self, pair: FriendPair) -> Result<bool, FriendRepositoryError>;
}

/// Fixture repository that stores nothing and reports no friendships.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFriendRepository;

#[async_trait]
impl FriendRepository for FixtureFriendRepository {
    async fn make_friends(&self, _pair: FriendPair) -> Result<(), FriendRepositoryError> {
        Ok(())
    }

    async fn break_off(&self, _pair: FriendPair) -> Result<(), FriendRepositoryError> {
        Ok(())
    }

    async fn are_friends(&self, _pair: FriendPair) -> Result<bool, FriendRepositoryError> {
        Ok(false)
    }
}
