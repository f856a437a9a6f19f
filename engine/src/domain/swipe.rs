//! Swipe events, weights, and the mutual-match relation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Directional swipe action type.
///
/// The enum is exhaustive on purpose: the per-type score weight is a total
/// function over it, so an unknown action cannot slip past the compiler the
/// way a string-keyed weight lookup could fail at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeType {
    Like,
    Dislike,
    Superlike,
}

impl SwipeType {
    /// Whether this swipe expresses interest and can take part in a match.
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Like | Self::Superlike)
    }

    /// Stable lowercase name used in logs and payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Superlike => "superlike",
        }
    }
}

impl fmt::Display for SwipeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed score weight granted to the swiped user, per swipe type.
///
/// Defaults follow the product's original table: likes and superlikes add
/// popularity, dislikes subtract it. Negative cumulative scores are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeWeights {
    pub like: i64,
    pub dislike: i64,
    pub superlike: i64,
}

impl SwipeWeights {
    /// Weight for a swipe type; total over the enum.
    pub const fn weight(self, swipe_type: SwipeType) -> i64 {
        match swipe_type {
            SwipeType::Like => self.like,
            SwipeType::Dislike => self.dislike,
            SwipeType::Superlike => self.superlike,
        }
    }
}

impl Default for SwipeWeights {
    fn default() -> Self {
        Self {
            like: 5,
            dislike: -5,
            superlike: 7,
        }
    }
}

/// Unique identity of a ledger entry.
///
/// Rewind deletes conditionally on this id, which is what makes a retried
/// or concurrent rewind observable as "already undone" instead of silently
/// removing a second event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwipeEventId(Uuid);

impl SwipeEventId {
    /// Generate a fresh random event id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SwipeEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Append-only record of one swipe.
///
/// Immutable once written; the only permitted mutation is whole-event
/// deletion of an actor's most recent entry during rewind. For a given
/// actor, events are totally ordered by `swiped_at` (ties broken by
/// insertion order), so "latest" is well defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeEvent {
    pub id: SwipeEventId,
    pub actor_id: UserId,
    pub target_id: UserId,
    pub swipe_type: SwipeType,
    pub swiped_at: DateTime<Utc>,
}

impl SwipeEvent {
    /// Build a new event with a fresh identity.
    pub fn new(
        actor_id: UserId,
        target_id: UserId,
        swipe_type: SwipeType,
        swiped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SwipeEventId::random(),
            actor_id,
            target_id,
            swipe_type,
            swiped_at,
        }
    }
}

/// Validation errors returned by [`FriendPair::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriendPairValidationError {
    SameUser { user_id: UserId },
}

impl fmt::Display for FriendPairValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameUser { user_id } => {
                write!(f, "user {user_id} cannot befriend themselves")
            }
        }
    }
}

impl std::error::Error for FriendPairValidationError {}

/// Unordered pair of matched users.
///
/// ## Invariants
/// - The two members are distinct.
/// - Construction normalizes ordering, so `{a, b}` and `{b, a}` compare and
///   hash identically; the relation is symmetric by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FriendPair {
    lower: UserId,
    higher: UserId,
}

impl FriendPair {
    /// Normalize and validate an unordered user pair.
    ///
    /// # Examples
    /// ```
    /// use swipe_engine::domain::{FriendPair, UserId};
    ///
    /// let ab = FriendPair::try_new(UserId::new(1), UserId::new(2)).expect("distinct");
    /// let ba = FriendPair::try_new(UserId::new(2), UserId::new(1)).expect("distinct");
    /// assert_eq!(ab, ba);
    /// ```
    pub fn try_new(a: UserId, b: UserId) -> Result<Self, FriendPairValidationError> {
        if a == b {
            return Err(FriendPairValidationError::SameUser { user_id: a });
        }
        let (lower, higher) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { lower, higher })
    }

    /// The member with the smaller id.
    pub const fn lower(self) -> UserId {
        self.lower
    }

    /// The member with the larger id.
    pub const fn higher(self) -> UserId {
        self.higher
    }
}
