//! Sentiment scorer — eligibility guard, rounding, rate limiting
//!
//! Wraps a [`SentimentClient`] with the policy the ingestion pipeline needs:
//! reviews longer than 1500 characters are never sent to the service (and
//! never persisted), eligible reviews are scored exactly once, scores are
//! rounded to 3 decimals, and successive service calls are spaced by the
//! cool-down gate.

use super::gate::{CooldownGate, Pacer};
use super::{SentimentClient, SentimentError};
use std::sync::Arc;
use std::time::Duration;

/// Reviews longer than this many characters are skipped, not scored.
pub const MAX_SCORABLE_CHARS: usize = 1500;

/// Fixed pause between successive scoring calls.
pub const COOLDOWN_DELAY: Duration = Duration::from_millis(100);

/// Outcome of a scoring attempt.
///
/// Skipping is a policy exclusion, not an error: the caller must drop the
/// record silently and move on without pausing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreOutcome {
    /// The service was called; score rounded to 3 decimals.
    Scored(f64),
    /// Text exceeded [`MAX_SCORABLE_CHARS`]; no call was made.
    SkippedTooLong,
}

/// Round half away from zero to 3 decimal places.
fn round_to_3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Scorer owning the service client and the rate-limit gate.
pub struct SentimentScorer {
    client: Arc<dyn SentimentClient>,
    gate: CooldownGate,
    max_chars: usize,
}

impl SentimentScorer {
    /// Create a scorer with the default cool-down and eligibility cutoff.
    pub fn new(client: Arc<dyn SentimentClient>) -> Self {
        Self {
            client,
            gate: CooldownGate::new(COOLDOWN_DELAY),
            max_chars: MAX_SCORABLE_CHARS,
        }
    }

    /// Replace the cool-down pacing (delay and pacer). Used by tests to
    /// avoid wall-clock waits.
    pub fn with_gate(mut self, delay: Duration, pacer: Arc<dyn Pacer>) -> Self {
        self.gate = CooldownGate::with_pacer(delay, pacer);
        self
    }

    /// Score one review text.
    ///
    /// Returns `SkippedTooLong` without touching the service or the gate
    /// when the text exceeds the eligibility cutoff. Otherwise waits out
    /// any pending cool-down, calls the service once, and arms the gate
    /// on success. Fails fast per record; no retry.
    pub async fn score(&self, text: &str) -> Result<ScoreOutcome, SentimentError> {
        if text.chars().count() > self.max_chars {
            return Ok(ScoreOutcome::SkippedTooLong);
        }

        self.gate.wait().await;
        let raw = self.client.analyze(text).await?;
        if !(-1.0..=1.0).contains(&raw) || !raw.is_finite() {
            return Err(SentimentError::OutOfRange(raw));
        }
        self.gate.arm();

        Ok(ScoreOutcome::Scored(round_to_3(raw)))
    }
}
