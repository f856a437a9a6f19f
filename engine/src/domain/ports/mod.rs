//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain interacts with driven adapters (the
//! swipe ledger, friend store, score index, quota counter, and user
//! directory) and how the embedding request layer drives it (submission,
//! rewind, recommendation, leaderboard). Each driven port exposes strongly
//! typed errors so adapters map their failures into predictable variants.

mod friend_repository;
mod leaderboard_query;
mod recommendation_query;
mod rewind_command;
mod rewind_quota_store;
mod score_index;
mod swipe_ledger;
mod swipe_submission;
mod user_directory;

#[cfg(test)]
pub use friend_repository::MockFriendRepository;
pub use friend_repository::{FixtureFriendRepository, FriendRepository, FriendRepositoryError};
#[cfg(test)]
pub use leaderboard_query::MockLeaderboardQuery;
pub use leaderboard_query::{LeaderboardQuery, RankedUser, TopNRequest, TopNResponse};
#[cfg(test)]
pub use recommendation_query::MockRecommendationQuery;
pub use recommendation_query::{RecommendRequest, RecommendResponse, RecommendationQuery};
#[cfg(test)]
pub use rewind_command::MockRewindCommand;
pub use rewind_command::{RewindCommand, RewindRequest, RewindResponse};
#[cfg(test)]
pub use rewind_quota_store::MockRewindQuotaStore;
pub use rewind_quota_store::{
    FixtureRewindQuotaStore, RewindQuotaStore, RewindQuotaStoreError,
};
#[cfg(test)]
pub use score_index::MockScoreIndex;
pub use score_index::{NoOpScoreIndex, ScoreEntry, ScoreIndex, ScoreIndexError};
#[cfg(test)]
pub use swipe_ledger::MockSwipeLedger;
pub use swipe_ledger::{FixtureSwipeLedger, SwipeLedger, SwipeLedgerError};
#[cfg(test)]
pub use swipe_submission::MockSwipeSubmission;
pub use swipe_submission::{
    FixtureSwipeSubmission, SwipeRequest, SwipeResponse, SwipeSubmission,
};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{
    CandidateFilter, FixtureUserDirectory, UserDirectory, UserDirectoryError,
};
