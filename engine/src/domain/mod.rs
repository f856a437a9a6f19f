//! Domain entities, ports, and services of the matching engine.
//!
//! The module follows a hexagonal layout: value types and aggregates live
//! beside the services that orchestrate them, and every external
//! collaborator (ledger, friend store, score index, quota counter, user
//! directory) is reached through a port in [`ports`].

pub mod error;
pub mod ports;
pub mod swipe;
pub mod user;

mod leaderboard;
mod recommendation;
mod scoring;
mod swipe_service;

#[cfg(test)]
mod swipe_service_tests;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::leaderboard::LeaderboardService;
pub use self::recommendation::RecommendationService;
pub use self::scoring::ScoreRecordingSubmission;
pub use self::swipe::{
    FriendPair, FriendPairValidationError, SwipeEvent, SwipeEventId, SwipeType, SwipeWeights,
};
pub use self::swipe_service::SwipeService;
pub use self::user::{
    BirthYearWindow, Sex, UserId, UserProfile, UserSummary, UserSummaryValidationError,
};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
