//! In-process swipe ledger.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{SwipeLedger, SwipeLedgerError};
use crate::domain::{SwipeEvent, SwipeEventId, UserId};

/// Append-only ledger held in process memory.
///
/// Entries keep insertion order, so equal timestamps resolve "latest" to
/// the most recently appended event.
#[derive(Debug, Default)]
pub struct InMemorySwipeLedger {
    events: Mutex<Vec<SwipeEvent>>,
}

impl InMemorySwipeLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_events<T>(&self, f: impl FnOnce(&mut Vec<SwipeEvent>) -> T) -> T {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut events)
    }
}

#[async_trait]
impl SwipeLedger for InMemorySwipeLedger {
    async fn append(&self, event: &SwipeEvent) -> Result<(), SwipeLedgerError> {
        self.with_events(|events| events.push(event.clone()));
        Ok(())
    }

    async fn latest_for_actor(
        &self,
        actor_id: UserId,
    ) -> Result<Option<SwipeEvent>, SwipeLedgerError> {
        Ok(self.with_events(|events| {
            events
                .iter()
                .filter(|event| event.actor_id == actor_id)
                .max_by_key(|event| event.swiped_at)
                .cloned()
        }))
    }

    async fn has_positive_swipe(
        &self,
        actor_id: UserId,
        target_id: UserId,
    ) -> Result<bool, SwipeLedgerError> {
        Ok(self.with_events(|events| {
            events.iter().any(|event| {
                event.actor_id == actor_id
                    && event.target_id == target_id
                    && event.swipe_type.is_positive()
            })
        }))
    }

    async fn swiped_targets(
        &self,
        actor_id: UserId,
    ) -> Result<HashSet<UserId>, SwipeLedgerError> {
        Ok(self.with_events(|events| {
            events
                .iter()
                .filter(|event| event.actor_id == actor_id)
                .map(|event| event.target_id)
                .collect()
        }))
    }

    async fn remove(
        &self,
        actor_id: UserId,
        event_id: SwipeEventId,
    ) -> Result<bool, SwipeLedgerError> {
        Ok(self.with_events(|events| {
            let position = events
                .iter()
                .position(|event| event.actor_id == actor_id && event.id == event_id);
            match position {
                Some(index) => {
                    events.remove(index);
                    true
                }
                None => false,
            }
        }))
    }
}
