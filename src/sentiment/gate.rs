//! Cool-down gate for rate-limited service calls
//!
//! The external analysis service tolerates a bounded call rate. Rather than
//! sleeping unconditionally after each call, the gate arms itself after a
//! successful call and pauses the *next* caller, so a batch of N scored
//! records incurs exactly N-1 pauses and the final record pays nothing.
//! Pacing goes through the [`Pacer`] trait so tests can count pauses
//! without real wall-clock waits.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Abstraction over "wait this long" for cool-down pacing.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Production pacer backed by the tokio timer.
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Test pacer that records pauses instead of sleeping.
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pauses requested so far.
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self, _delay: Duration) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// Arms after each successful call; pauses the next caller once.
pub struct CooldownGate {
    delay: Duration,
    pacer: Arc<dyn Pacer>,
    armed: AtomicBool,
}

impl CooldownGate {
    /// Create a gate with the given delay, paced by the tokio timer.
    pub fn new(delay: Duration) -> Self {
        Self::with_pacer(delay, Arc::new(TokioPacer))
    }

    /// Create a gate with an injected pacer.
    pub fn with_pacer(delay: Duration, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            delay,
            pacer,
            armed: AtomicBool::new(false),
        }
    }

    /// Pause if the previous call armed the gate; disarms either way.
    pub async fn wait(&self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            tracing::debug!(delay_ms = self.delay.as_millis() as u64, "cool-down pause");
            self.pacer.pause(self.delay).await;
        }
    }

    /// Arm the gate so the next `wait()` pauses.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}
