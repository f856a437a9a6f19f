//! Candidate recommendation service.
//!
//! Recommendation bypasses the swipe orchestrator: it reads the user
//! directory for attribute filtering and the swipe ledger for exclusions,
//! and has no side effects.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{
    CandidateFilter, RecommendRequest, RecommendResponse, RecommendationQuery, SwipeLedger,
    SwipeLedgerError, UserDirectory, UserDirectoryError,
};

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

fn map_ledger_error(error: SwipeLedgerError) -> Error {
    match error {
        SwipeLedgerError::Connection { message } => {
            Error::service_unavailable(format!("swipe ledger unavailable: {message}"))
        }
        SwipeLedgerError::Query { message } => {
            Error::internal(format!("swipe ledger error: {message}"))
        }
    }
}

/// Recommendation service implementing the query driving port.
#[derive(Clone)]
pub struct RecommendationService<D, L> {
    directory: Arc<D>,
    ledger: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<D, L> RecommendationService<D, L> {
    /// Create a new recommendation service.
    pub fn new(directory: Arc<D>, ledger: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory,
            ledger,
            clock,
        }
    }
}

#[async_trait]
impl<D, L> RecommendationQuery for RecommendationService<D, L>
where
    D: UserDirectory,
    L: SwipeLedger,
{
    async fn recommend(&self, request: RecommendRequest) -> Result<RecommendResponse, Error> {
        if request.limit <= 0 {
            return Err(Error::invalid_request("limit must be positive")
                .with_details(json!({ "limit": request.limit })));
        }

        let profile = self
            .directory
            .profile(request.user_id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| {
                Error::not_found(format!("no profile for user {}", request.user_id))
            })?;

        let current_year = self.clock.local().year();
        let filter = CandidateFilter {
            sex: profile.dating_sex,
            location: profile.location.clone(),
            birth_years: profile.birth_year_window(current_year),
        };

        let mut candidates = self
            .directory
            .filter(&filter)
            .await
            .map_err(map_directory_error)?;

        let swiped = self
            .ledger
            .swiped_targets(request.user_id)
            .await
            .map_err(map_ledger_error)?;

        // Ascending id keeps tie ordering deterministic per call.
        candidates.retain(|id| *id != request.user_id && !swiped.contains(id));
        candidates.sort_unstable();
        candidates.dedup();
        candidates.truncate(usize::try_from(request.limit).unwrap_or(usize::MAX));

        Ok(RecommendResponse {
            candidate_ids: candidates,
        })
    }
}
