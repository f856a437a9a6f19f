//! Port for the ordered cumulative-score index.
//!
//! The index is a derived, eventually-synchronized view of retained swipe
//! history: incremented when a swipe is recorded, decremented when it is
//! rewound. A leaderboard read racing an increment/decrement pair may
//! observe them out of order; that drift is accepted by design.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::UserId;

/// One `(user, cumulative score)` pair from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEntry {
    pub user_id: UserId,
    pub score: i64,
}

/// Errors surfaced by score index adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreIndexError {
    /// Index connectivity failure.
    #[error("score index connection failed: {message}")]
    Connection { message: String },
    /// Command failed during execution.
    #[error("score index command failed: {message}")]
    Command { message: String },
}

impl ScoreIndexError {
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

/// Ordered key-score structure with sorted-set semantics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreIndex: Send + Sync {
    /// Atomically add `delta` (possibly negative) to the user's score and
    /// return the new cumulative value. Scores are never clamped at zero.
    async fn increment(&self, user_id: UserId, delta: i64) -> Result<i64, ScoreIndexError>;

    /// The top `count` entries by descending score, rank 1 first. Ties
    /// follow the underlying index's comparison order.
    async fn top(&self, count: usize) -> Result<Vec<ScoreEntry>, ScoreIndexError>;
}

/// Score index that ignores every mutation and ranks nobody.
///
/// Substituting this for a real index disables scoring on a submission
/// path without touching match logic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpScoreIndex;

#[async_trait]
impl ScoreIndex for NoOpScoreIndex {
    async fn increment(&self, _user_id: UserId, _delta: i64) -> Result<i64, ScoreIndexError> {
        Ok(0)
    }

    async fn top(&self, _count: usize) -> Result<Vec<ScoreEntry>, ScoreIndexError> {
        Ok(Vec::new())
    }
}
