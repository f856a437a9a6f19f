//! Swipe orchestrator: the submission and rewind decision logic.
//!
//! Submission appends to the ledger, checks reciprocity, and forms the
//! friend relation. Rewind is the inverse path behind a daily quota: the
//! conditional ledger deletion is the commit point, after which the friend
//! relation and the target's score are compensated and the quota counter
//! is bumped with an expiry aligned to local midnight.
//!
//! Scoring on the submission path is deliberately absent here; it is a
//! cross-cutting wrapper (see [`crate::domain::ScoreRecordingSubmission`]).

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use mockable::Clock;
use serde_json::json;
use tokio::sync::Mutex as AsyncMutex;

use crate::domain::ports::{
    FriendRepository, FriendRepositoryError, RewindCommand, RewindQuotaStore,
    RewindQuotaStoreError, RewindRequest, RewindResponse, ScoreIndex, ScoreIndexError,
    SwipeLedger, SwipeLedgerError, SwipeRequest, SwipeResponse, SwipeSubmission,
};
use crate::domain::{Error, FriendPair, SwipeEvent, SwipeWeights, UserId};

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

fn map_friend_error(error: FriendRepositoryError) -> Error {
    match error {
        FriendRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("friend repository unavailable: {message}"))
        }
        FriendRepositoryError::Query { message } => {
            Error::internal(format!("friend repository error: {message}"))
        }
    }
}

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

fn map_quota_error(error: RewindQuotaStoreError) -> Error {
    match error {
        RewindQuotaStoreError::Connection { message } => {
            Error::service_unavailable(format!("rewind quota store unavailable: {message}"))
        }
        RewindQuotaStoreError::Command { message } => {
            Error::internal(format!("rewind quota store error: {message}"))
        }
    }
}

/// Seconds from `now` until the next local midnight, floored at one so the
/// counter always carries an expiry.
fn seconds_until_local_midnight(now: DateTime<Local>) -> u64 {
    let midnight = now
        .date_naive()
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0));
    match midnight {
        Some(next) => {
            let remaining = (next - now.naive_local()).num_seconds();
            u64::try_from(remaining).unwrap_or(0).max(1)
        }
        None => 1,
    }
}

/// Registry of per-user async locks serializing rewinds.
///
/// The fetch-latest/conditionally-delete sequence is not atomic at the
/// store; without mutual exclusion two rewinds by the same user could both
/// fetch the same latest event. Locks are created on demand and kept for
/// the life of the service.
#[derive(Debug, Default)]
struct UserLocks {
    inner: StdMutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl UserLocks {
    fn for_user(&self, user_id: UserId) -> Arc<AsyncMutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            map.entry(user_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        )
    }
}

/// Orchestrator implementing the submission and rewind driving ports.
#[derive(Clone)]
pub struct SwipeService<L, F, S, Q> {
    ledger: Arc<L>,
    friends: Arc<F>,
    scores: Arc<S>,
    quota: Arc<Q>,
    clock: Arc<dyn Clock>,
    weights: SwipeWeights,
    rewind_daily_limit: u32,
    rewind_locks: Arc<UserLocks>,
}

impl<L, F, S, Q> SwipeService<L, F, S, Q> {
    /// Create a new orchestrator over the injected collaborators.
    pub fn new(
        ledger: Arc<L>,
        friends: Arc<F>,
        scores: Arc<S>,
        quota: Arc<Q>,
        clock: Arc<dyn Clock>,
        weights: SwipeWeights,
        rewind_daily_limit: u32,
    ) -> Self {
        Self {
            ledger,
            friends,
            scores,
            quota,
            clock,
            weights,
            rewind_daily_limit,
            rewind_locks: Arc::new(UserLocks::default()),
        }
    }
}

#[async_trait]
impl<L, F, S, Q> SwipeSubmission for SwipeService<L, F, S, Q>
where
    L: SwipeLedger,
    F: FriendRepository,
    S: ScoreIndex,
    Q: RewindQuotaStore,
{
    async fn submit(&self, request: SwipeRequest) -> Result<SwipeResponse, Error> {
        if request.actor_id == request.target_id {
            return Err(Error::invalid_request("users cannot swipe themselves"));
        }

        let event = SwipeEvent::new(
            request.actor_id,
            request.target_id,
            request.swipe_type,
            self.clock.utc(),
        );
        self.ledger.append(&event).await.map_err(map_ledger_error)?;

        if !request.swipe_type.is_positive() {
            return Ok(SwipeResponse { matched: false });
        }

        let reciprocated = self
            .ledger
            .has_positive_swipe(request.target_id, request.actor_id)
            .await
            .map_err(map_ledger_error)?;

        if reciprocated {
            let pair = FriendPair::try_new(request.actor_id, request.target_id)
                .map_err(|err| Error::internal(format!("invalid match pair: {err}")))?;
            self.friends
                .make_friends(pair)
                .await
                .map_err(map_friend_error)?;
        }

        Ok(SwipeResponse {
            matched: reciprocated,
        })
    }
}

#[async_trait]
impl<L, F, S, Q> RewindCommand for SwipeService<L, F, S, Q>
where
    L: SwipeLedger,
    F: FriendRepository,
    S: ScoreIndex,
    Q: RewindQuotaStore,
{
    async fn rewind(&self, request: RewindRequest) -> Result<RewindResponse, Error> {
        let lock = self.rewind_locks.for_user(request.user_id);
        let _guard = lock.lock().await;

        let now = self.clock.local();
        let today = now.date_naive();

        let used = self
            .quota
            .count(request.user_id, today)
            .await
            .map_err(map_quota_error)?;
        if used >= self.rewind_daily_limit {
            return Err(Error::rewind_limited("daily rewind limit reached")
                .with_details(json!({ "limit": self.rewind_daily_limit })));
        }

        let latest = self
            .ledger
            .latest_for_actor(request.user_id)
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| Error::not_found("no swipe history to rewind"))?;

        // Commit point: deleting first makes a retry after a partial
        // failure observe "nothing to undo" instead of compensating twice.
        let removed = self
            .ledger
            .remove(request.user_id, latest.id)
            .await
            .map_err(map_ledger_error)?;
        if !removed {
            return Err(Error::not_found("latest swipe was already rewound"));
        }

        if latest.swipe_type.is_positive()
            && let Ok(pair) = FriendPair::try_new(request.user_id, latest.target_id)
        {
            self.friends
                .break_off(pair)
                .await
                .map_err(map_friend_error)?;
        }

        self.scores
            .increment(latest.target_id, -self.weights.weight(latest.swipe_type))
            .await
            .map_err(map_score_error)?;

        let used_today = self
            .quota
            .increment(
                request.user_id,
                today,
                seconds_until_local_midnight(now),
            )
            .await
            .map_err(map_quota_error)?;

        Ok(RewindResponse {
            undone_type: latest.swipe_type,
            target_id: latest.target_id,
            used_today,
        })
    }
}
