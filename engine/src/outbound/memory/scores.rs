//! In-process ordered score index.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::ports::{ScoreEntry, ScoreIndex, ScoreIndexError};

/// Score index held in process memory.
///
/// Ranking ties are broken by ascending user id so repeated reads stay
/// deterministic.
#[derive(Debug, Default)]
pub struct InMemoryScoreIndex {
    scores: Mutex<HashMap<UserId, i64>>,
}

impl InMemoryScoreIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cumulative score for a user, if any swipe has credited them.
    pub fn score(&self, user_id: UserId) -> Option<i64> {
        self.scores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .copied()
    }
}

#[async_trait]
impl ScoreIndex for InMemoryScoreIndex {
    async fn increment(&self, user_id: UserId, delta: i64) -> Result<i64, ScoreIndexError> {
        let mut scores = self.scores.lock().unwrap_or_else(PoisonError::into_inner);
        let score = scores.entry(user_id).or_insert(0);
        *score = score.saturating_add(delta);
        Ok(*score)
    }

    async fn top(&self, count: usize) -> Result<Vec<ScoreEntry>, ScoreIndexError> {
        let scores = self.scores.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<ScoreEntry> = scores
            .iter()
            .map(|(user_id, score)| ScoreEntry {
                user_id: *user_id,
                score: *score,
            })
            .collect();
        entries.sort_unstable_by(|a, b| {
            b.score.cmp(&a.score).then(a.user_id.cmp(&b.user_id))
        });
        entries.truncate(count);
        Ok(entries)
    }
}
