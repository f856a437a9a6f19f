//! Driving port for recording a swipe decision.

use async_trait::async_trait;

use crate::domain::{Error, SwipeType, UserId};

/// One directional swipe to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeRequest {
    pub actor_id: UserId,
    pub target_id: UserId,
    pub swipe_type: SwipeType,
}

/// Outcome of a recorded swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeResponse {
    /// Whether this swipe completed a mutual match. Always `false` for
    /// dislikes.
    pub matched: bool,
}

/// Entry point for swipe submissions.
///
/// This is the seam the score-recording wrapper composes around: match
/// decision logic implements the trait, cross-cutting scoring decorates
/// it. Callers wanting submissions without scoring hold the inner
/// implementation directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwipeSubmission: Send + Sync {
    /// Record the swipe and report whether it formed a match.
    async fn submit(&self, request: SwipeRequest) -> Result<SwipeResponse, Error>;
}

/// Fixture submission that records nothing and never matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSwipeSubmission;

#[async_trait]
impl SwipeSubmission for FixtureSwipeSubmission {
    async fn submit(&self, _request: SwipeRequest) -> Result<SwipeResponse, Error> {
        Ok(SwipeResponse { matched: false })
    }
}
