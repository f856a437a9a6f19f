//! Port for the external user directory.
//!
//! Profile storage, registration, and verification live outside the
//! engine; this port exposes only the reads the engine needs.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{BirthYearWindow, Sex, UserId, UserProfile, UserSummary};

/// Attribute filter for candidate recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Candidate sex must equal the seeker's dating preference.
    pub sex: Sex,
    /// Candidates must share the seeker's location.
    pub location: String,
    /// Candidate birth year must fall strictly inside this band.
    pub birth_years: BirthYearWindow,
}

/// Errors surfaced by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserDirectoryError {
    /// Directory connectivity failure.
    #[error("user directory connection failed: {message}")]
    Connection { message: String },
    /// Lookup failed during execution.
    #[error("user directory lookup failed: {message}")]
    Lookup { message: String },
}

impl UserDirectoryError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for lookup failures.
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }
}

/// Read-only access to externally stored user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch one user's dating profile, if the user exists.
    async fn profile(&self, user_id: UserId)
    -> Result<Option<UserProfile>, UserDirectoryError>;

    /// Ids of every user matching the attribute filter, in directory order.
    async fn filter(&self, filter: &CandidateFilter)
    -> Result<Vec<UserId>, UserDirectoryError>;

    /// Resolve profile summaries for the full id set in one round trip.
    ///
    /// Ids unknown to the directory are absent from the result rather than
    /// an error; callers decide how to treat the gap.
    async fn summaries(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, UserSummary>, UserDirectoryError>;
}

/// Fixture directory that knows no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn profile(
        &self,
        _user_id: UserId,
    ) -> Result<Option<UserProfile>, UserDirectoryError> {
        Ok(None)
    }

    async fn filter(
        &self,
        _filter: &CandidateFilter,
    ) -> Result<Vec<UserId>, UserDirectoryError> {
        Ok(Vec::new())
    }

    async fn summaries(
        &self,
        _user_ids: &[UserId],
    ) -> Result<HashMap<UserId, UserSummary>, UserDirectoryError> {
        Ok(HashMap::new())
    }
}
