//! Swipe-popularity leaderboard service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{
    LeaderboardQuery, RankedUser, ScoreIndex, ScoreIndexError, TopNRequest, TopNResponse,
    UserDirectory, UserDirectoryError,
};

fn map_score_error(error: ScoreIndexError) -> Error {
    match error {
        ScoreIndexError::Connection { message } => {
            Error::service_unavailable(format!("score index unavailable: {message}"))
        }
        ScoreIndexError::Command { message } => {
            Error::internal(format!("score index error: {message}"))
        }
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Lookup { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

/// Leaderboard service implementing the query driving port.
///
/// Profile summaries are resolved with one batched directory call for the
/// whole ranked id set; per-id lookups would put a directory round trip
/// inside the ranking loop.
#[derive(Clone)]
pub struct LeaderboardService<S, D> {
    scores: Arc<S>,
    directory: Arc<D>,
}

impl<S, D> LeaderboardService<S, D> {
    /// Create a new leaderboard service.
    pub fn new(scores: Arc<S>, directory: Arc<D>) -> Self {
        Self { scores, directory }
    }
}

#[async_trait]
impl<S, D> LeaderboardQuery for LeaderboardService<S, D>
where
    S: ScoreIndex,
    D: UserDirectory,
{
    async fn top_n(&self, request: TopNRequest) -> Result<TopNResponse, Error> {
        if request.count <= 0 {
            return Err(Error::invalid_request("count must be positive")
                .with_details(json!({ "count": request.count })));
        }

        let ranked = self
            .scores
            .top(usize::try_from(request.count).unwrap_or(usize::MAX))
            .await
            .map_err(map_score_error)?;

        let ids: Vec<_> = ranked.iter().map(|entry| entry.user_id).collect();
        let mut summaries = self
            .directory
            .summaries(&ids)
            .await
            .map_err(map_directory_error)?;

        let mut entries = Vec::with_capacity(ranked.len());
        for (position, entry) in ranked.into_iter().enumerate() {
            let rank = u32::try_from(position.saturating_add(1)).unwrap_or(u32::MAX);
            match summaries.remove(&entry.user_id) {
                Some(user) => entries.push(RankedUser {
                    rank,
                    user,
                    score: entry.score,
                }),
                None => {
                    // Index and directory can disagree transiently; keep the
                    // remaining rows and their index-derived ranks.
                    tracing::warn!(
                        user_id = %entry.user_id,
                        rank,
                        "ranked user missing from directory; skipping entry",
                    );
                }
            }
        }

        Ok(TopNResponse { entries })
    }
}
