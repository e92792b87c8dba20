//! Subprocess transport for the sentiment analysis service
//!
//! Production deployments reach the analysis service through a small
//! adapter command: the review text goes to the child's stdin, and the
//! child answers with one JSON object on stdout:
//!
//! ```text
//! {"score": 0.8}
//! ```
//!
//! The score must be the service's document-level polarity in [-1.0, 1.0];
//! range enforcement and rounding stay with the scorer.

use super::{SentimentClient, SentimentError};
use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    score: f64,
}

/// Client that shells out to a sentiment adapter command per call.
pub struct CommandSentimentClient {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandSentimentClient {
    /// Create a client for the given adapter command.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Add arguments passed to the adapter command.
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, text: &str) -> Result<Vec<u8>, SentimentError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                SentimentError::Unavailable(format!(
                    "failed to start {}: {}",
                    self.program, e
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| SentimentError::InvocationFailed(format!("stdin write: {}", e)))?;
            // Dropping stdin closes it so the child sees EOF
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| SentimentError::InvocationFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(SentimentError::InvocationFailed(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl SentimentClient for CommandSentimentClient {
    async fn analyze(&self, text: &str) -> Result<f64, SentimentError> {
        let stdout = timeout(self.timeout, self.run(text))
            .await
            .map_err(|_| {
                SentimentError::InvocationFailed(format!(
                    "{} timed out after {:?}",
                    self.program, self.timeout
                ))
            })??;

        let response: AnalyzeResponse = serde_json::from_slice(&stdout)
            .map_err(|e| SentimentError::MalformedResponse(e.to_string()))?;
        Ok(response.score)
    }
}
