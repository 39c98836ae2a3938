//! Bounded status polling for a submitted prediction.
//!
//! `starting -> processing -> {succeeded | failed | canceled}`; after
//! `max_attempts` non-terminal polls the job is given up as timed out.
//! Waiting is a tokio sleep, so dropping the future cancels the timer.

use std::time::Duration;

use metrics::histogram;
use tracing::debug;

use crate::generate::error::GenerationError;
use crate::generate::provider::{JobState, PredictionApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 21,
        }
    }
}

impl PollPolicy {
    /// Worst-case wall-clock spent sleeping between polls.
    pub fn window(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

/// Poll until a terminal state. Returns the job output on success (possibly empty).
pub async fn poll_prediction(
    api: &dyn PredictionApi,
    id: &str,
    policy: PollPolicy,
) -> Result<Vec<String>, GenerationError> {
    let max = policy.max_attempts.max(1);

    for attempt in 1..=max {
        let status = api.status(id).await?;
        match status.status {
            JobState::Succeeded => {
                histogram!("generation_poll_attempts").record(attempt as f64);
                return Ok(status.output.unwrap_or_default());
            }
            JobState::Failed | JobState::Canceled => {
                histogram!("generation_poll_attempts").record(attempt as f64);
                return Err(GenerationError::Terminal {
                    state: status.status,
                    detail: status.error,
                });
            }
            other => {
                debug!(target: "generation", %id, attempt, state = %other, "prediction pending");
            }
        }
        if attempt < max {
            tokio::time::sleep(policy.interval).await;
        }
    }

    histogram!("generation_poll_attempts").record(max as f64);
    Err(GenerationError::Timeout { attempts: max })
}
