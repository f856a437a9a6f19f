//! Cross-cutting score recording around the submission path.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{ScoreIndex, SwipeRequest, SwipeResponse, SwipeSubmission};
use crate::domain::SwipeWeights;

/// Decorator that credits the swiped user's popularity score after a
/// successful submission.
///
/// The wrapper keeps match-decision logic and scoring independently
/// testable and lets endpoints opt out of scoring (or share one weight
/// table across several submission paths) by composing differently.
/// Failed submissions never touch the index. A score failure after a
/// durable submission is logged and swallowed: the swipe already stands,
/// and surfacing an error here would invite a duplicate retry. The index
/// is an eventually-synchronized view, so the drift is acceptable.
#[derive(Clone)]
pub struct ScoreRecordingSubmission<S, I> {
    inner: Arc<S>,
    scores: Arc<I>,
    weights: SwipeWeights,
}

impl<S, I> ScoreRecordingSubmission<S, I> {
    /// Wrap a submission path with score recording.
    pub fn new(inner: Arc<S>, scores: Arc<I>, weights: SwipeWeights) -> Self {
        Self {
            inner,
            scores,
            weights,
        }
    }
}

#[async_trait]
impl<S, I> SwipeSubmission for ScoreRecordingSubmission<S, I>
where
    S: SwipeSubmission,
    I: ScoreIndex,
{
    async fn submit(&self, request: SwipeRequest) -> Result<SwipeResponse, Error> {
        let response = self.inner.submit(request).await?;

        let delta = self.weights.weight(request.swipe_type);
        if let Err(error) = self.scores.increment(request.target_id, delta).await {
            tracing::warn!(
                target_id = %request.target_id,
                swipe_type = %request.swipe_type,
                %delta,
                %error,
                "swipe recorded but score increment failed",
            );
        }

        Ok(response)
    }
}
