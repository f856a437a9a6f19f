//! Driving port for the swipe-popularity leaderboard.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserSummary};

/// Request for the top of the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopNRequest {
    /// Number of leading entries wanted; must be positive.
    pub count: i64,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedUser {
    /// Position in the index, rank 1 = highest score.
    pub rank: u32,
    pub user: UserSummary,
    pub score: i64,
}

/// Ranked leaderboard slice, highest score first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopNResponse {
    pub entries: Vec<RankedUser>,
}

/// Entry point for leaderboard reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardQuery: Send + Sync {
    /// The top `count` users by cumulative received swipe weight.
    async fn top_n(&self, request: TopNRequest) -> Result<TopNResponse, Error>;
}
