//! In-process friend relation store.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::FriendPair;
use crate::domain::ports::{FriendRepository, FriendRepositoryError};

/// Friend relation held in process memory.
///
/// [`FriendPair`] normalizes member order, so the set membership check is
/// symmetric and both mutations are idempotent for free.
#[derive(Debug, Default)]
pub struct InMemoryFriendRepository {
    pairs: Mutex<HashSet<FriendPair>>,
}

impl InMemoryFriendRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FriendRepository for InMemoryFriendRepository {
    async fn make_friends(&self, pair: FriendPair) -> Result<(), FriendRepositoryError> {
        self.pairs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pair);
        Ok(())
    }

    async fn break_off(&self, pair: FriendPair) -> Result<(), FriendRepositoryError> {
        self.pairs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&pair);
        Ok(())
    }

    async fn are_friends(&self, pair: FriendPair) -> Result<bool, FriendRepositoryError> {
        Ok(self
            .pairs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&pair))
    }
}
