//! Driving port for undoing the most recent swipe.

use async_trait::async_trait;

use crate::domain::{Error, SwipeType, UserId};

/// Request to undo the acting user's latest swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewindRequest {
    pub user_id: UserId,
}

/// Details of the swipe that was undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewindResponse {
    /// Type of the undone swipe.
    pub undone_type: SwipeType,
    /// User the undone swipe was aimed at.
    pub target_id: UserId,
    /// Rewinds consumed so far today, including this one.
    pub used_today: u32,
}

/// Entry point for rewinds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewindCommand: Send + Sync {
    /// Undo the user's most recent swipe.
    ///
    /// Fails with [`crate::domain::ErrorCode::RewindLimited`] when today's
    /// allowance is spent and [`crate::domain::ErrorCode::NotFound`] when
    /// the user has no swipe history.
    async fn rewind(&self, request: RewindRequest) -> Result<RewindResponse, Error>;
}
