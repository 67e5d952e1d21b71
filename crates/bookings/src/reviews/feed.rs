use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::client::{FetchError, ReviewClient};
use crate::models::Review;

/// What a UI renders for a business: the latest review list and the latest error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewsState {
    pub reviews: Vec<Review>,
    pub error: Option<String>,
}

struct Inner {
    client: ReviewClient,
    state: watch::Sender<ReviewsState>,
    generation: AtomicU64,
}

/// Watchable review list for a single business id at a time.
///
/// Each trigger takes a new generation number. A response is applied only if
/// its generation is still the latest, so a slow response for an old id can
/// never overwrite the result for the current one.
#[derive(Clone)]
pub struct ReviewFeed {
    inner: Arc<Inner>,
}

impl ReviewFeed {
    pub fn new(client: ReviewClient) -> Self {
        let (state, _) = watch::channel(ReviewsState::default());
        Self {
            inner: Arc::new(Inner {
                client,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ReviewsState> {
        self.inner.state.subscribe()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> ReviewsState {
        self.inner.state.borrow().clone()
    }

    /// Fetches reviews for `business_id` now, superseding any in-flight request.
    pub async fn fetch(&self, business_id: Option<&str>) {
        let generation = self.next_generation();
        self.fetch_as(generation, business_id).await;
    }

    /// Fetches once for the current id, then again every time `business_id`
    /// changes. The task ends when the sender side is dropped.
    pub fn follow(&self, mut business_id: watch::Receiver<Option<String>>) -> JoinHandle<()> {
        let feed = self.clone();
        tokio::spawn(async move {
            loop {
                let id = business_id.borrow_and_update().clone();
                // Generation is taken here, in trigger order, not inside the request task.
                let generation = feed.next_generation();
                let request_feed = feed.clone();
                tokio::spawn(async move {
                    request_feed.fetch_as(generation, id.as_deref()).await;
                });

                if business_id.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    async fn fetch_as(&self, generation: u64, business_id: Option<&str>) {
        let Some(business_id) = business_id.filter(|id| !id.is_empty()) else {
            warn!("No business ID available, skipping review fetch");
            return;
        };

        let result = self.inner.client.fetch_reviews(business_id).await;
        self.apply(generation, result);
    }

    /// Publishes a fetch result. Returns `false` if it was stale and dropped.
    fn apply(&self, generation: u64, result: Result<Vec<Review>, FetchError>) -> bool {
        if !self.is_current(generation) {
            debug!("Discarding review response from superseded request {generation}");
            return false;
        }

        self.inner.state.send_modify(|state| match result {
            Ok(reviews) => {
                state.reviews = reviews;
                state.error = None;
            }
            // Keep whatever list was shown before.
            Err(e) => state.error = Some(e.to_string()),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reviewer;
    use serde_json::Map;

    fn review(id: &str) -> Review {
        Review {
            id: id.to_string(),
            business: None,
            rating: Some(5.0),
            comment: None,
            reviewer: Reviewer::anonymous(),
            extra: Map::new(),
        }
    }

    fn feed() -> ReviewFeed {
        ReviewFeed::new(ReviewClient::new("http://127.0.0.1:9"))
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let feed = feed();
        let first = feed.next_generation();
        let second = feed.next_generation();

        assert!(feed.apply(second, Ok(vec![review("new")])));
        assert!(!feed.apply(first, Ok(vec![review("old")])));

        assert_eq!(feed.snapshot().reviews, vec![review("new")]);
    }

    #[test]
    fn test_error_keeps_previous_reviews() {
        let feed = feed();
        let g = feed.next_generation();
        feed.apply(g, Ok(vec![review("R1")]));

        let g = feed.next_generation();
        feed.apply(g, Err(FetchError::Rejected("not found".into())));

        let state = feed.snapshot();
        assert_eq!(state.reviews, vec![review("R1")]);
        assert_eq!(state.error.as_deref(), Some("not found"));
    }

    #[test]
    fn test_success_clears_error() {
        let feed = feed();
        let g = feed.next_generation();
        feed.apply(g, Err(FetchError::Rejected("boom".into())));

        let g = feed.next_generation();
        feed.apply(g, Ok(vec![]));

        assert_eq!(feed.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_missing_business_id_leaves_state_untouched() {
        let feed = feed();
        feed.fetch(None).await;
        feed.fetch(Some("")).await;

        assert_eq!(feed.snapshot(), ReviewsState::default());
    }
}
