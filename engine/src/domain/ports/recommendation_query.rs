//! Driving port for candidate recommendation.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Request for a batch of candidate profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendRequest {
    pub user_id: UserId,
    /// Maximum number of candidates to return; must be positive.
    pub limit: i64,
}

/// Recommended candidates, already exclusion-filtered and capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendResponse {
    /// Candidate ids in ascending id order (deterministic per call).
    pub candidate_ids: Vec<UserId>,
}

/// Entry point for recommendation reads. No side effects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationQuery: Send + Sync {
    /// Compute the candidate set for the user.
    async fn recommend(&self, request: RecommendRequest) -> Result<RecommendResponse, Error>;
}
