//! In-process user directory.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{CandidateFilter, UserDirectory, UserDirectoryError};
use crate::domain::{UserId, UserProfile, UserSummary, UserSummaryValidationError};

#[derive(Debug, Clone)]
struct DirectoryRecord {
    profile: UserProfile,
    summary: UserSummary,
}

/// User directory held in process memory.
///
/// Filter results are returned in ascending id order; the port leaves
/// directory ordering unspecified, and a stable order keeps tests simple.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<UserId, DirectoryRecord>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user, replacing any existing record with the same id.
    pub fn insert(
        &self,
        profile: UserProfile,
        nickname: impl Into<String>,
    ) -> Result<(), UserSummaryValidationError> {
        let summary = UserSummary::try_new(
            profile.user_id,
            nickname,
            profile.sex,
            profile.birth_year,
            profile.location.clone(),
        )?;
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.user_id, DirectoryRecord { profile, summary });
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn profile(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserProfile>, UserDirectoryError> {
        Ok(self
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .map(|record| record.profile.clone()))
    }

    async fn filter(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<UserId>, UserDirectoryError> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let mut matches: Vec<UserId> = users
            .values()
            .filter(|record| {
                record.profile.sex == filter.sex
                    && record.profile.location == filter.location
                    && filter.birth_years.contains(record.profile.birth_year)
            })
            .map(|record| record.profile.user_id)
            .collect();
        matches.sort_unstable();
        Ok(matches)
    }

    async fn summaries(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, UserSummary>, UserDirectoryError> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(user_ids
            .iter()
            .filter_map(|id| users.get(id).map(|record| (*id, record.summary.clone())))
            .collect())
    }
}
