//! Sentiment analysis service client
//!
//! Defines the client trait and error types for calling the external
//! natural-language analysis service. Two implementations:
//! - `CommandSentimentClient`: pipes text through an adapter command that
//!   fronts the real service (production)
//! - `MockSentimentClient`: returns preconfigured scores (testing)
//!
//! The service is called once per eligible review, synchronously, and
//! produces a document-level polarity score in [-1.0, 1.0]. The scorer
//! wrapper in [`scorer`] adds the input-size eligibility guard, the
//! 3-decimal rounding, and the rate-limit cool-down.

mod command;
mod gate;
mod scorer;

pub use command::CommandSentimentClient;
pub use gate::{CooldownGate, CountingPacer, Pacer, TokioPacer};
pub use scorer::{ScoreOutcome, SentimentScorer, COOLDOWN_DELAY, MAX_SCORABLE_CHARS};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Errors from sentiment client operations.
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    #[error("sentiment service not available: {0}")]
    Unavailable(String),
    #[error("sentiment call failed: {0}")]
    InvocationFailed(String),
    #[error("malformed sentiment response: {0}")]
    MalformedResponse(String),
    #[error("sentiment score out of range: {0}")]
    OutOfRange(f64),
}

/// Client trait for the external sentiment analysis service.
///
/// Abstracts over transport so the scorer and the ingestion pipeline
/// don't depend on how the service is reached.
#[async_trait]
pub trait SentimentClient: Send + Sync {
    /// Analyze one document and return its polarity score in [-1.0, 1.0].
    async fn analyze(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Mock client for testing — returns preconfigured scores.
///
/// Responses are consumed in order when queued via [`push_response`];
/// once the queue is empty the fallback score (default 0.0) is returned.
/// Every call is counted regardless of outcome.
///
/// [`push_response`]: MockSentimentClient::push_response
pub struct MockSentimentClient {
    fallback: f64,
    queued: Mutex<VecDeque<Result<f64, SentimentError>>>,
    calls: AtomicUsize,
}

impl Default for MockSentimentClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSentimentClient {
    /// Create a mock client that scores everything 0.0.
    pub fn new() -> Self {
        Self {
            fallback: 0.0,
            queued: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Set the fallback score returned when no queued response remains.
    pub fn with_score(mut self, score: f64) -> Self {
        self.fallback = score;
        self
    }

    /// Queue a successful response for the next unanswered call.
    pub fn push_response(&self, score: f64) {
        self.queued.lock().unwrap().push_back(Ok(score));
    }

    /// Queue a failure for the next unanswered call.
    pub fn push_failure(&self, error: SentimentError) {
        self.queued.lock().unwrap().push_back(Err(error));
    }

    /// Number of analyze calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentClient for MockSentimentClient {
    async fn analyze(&self, _text: &str) -> Result<f64, SentimentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.queued.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(self.fallback),
        }
    }
}
