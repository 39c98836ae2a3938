use std::time::Duration;

use crate::generate::provider::JobState;

/// Everything that can go wrong on the primary path. Never leaves the
/// orchestrator; each variant degrades to the fallback provider.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("primary provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("primary provider returned HTTP {0}")]
    Status(u16),
    #[error("prediction {state}{}", detail_suffix(.detail))]
    Terminal {
        state: JobState,
        detail: Option<String>,
    },
    #[error("prediction timed out after {attempts} polls")]
    Timeout { attempts: u32 },
    #[error("primary provider did not return images")]
    EmptyOutput,
    #[error("primary path exceeded its {0:?} budget")]
    Deadline(Duration),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl GenerationError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Transport(_) => "transport",
            GenerationError::Status(_) => "status",
            GenerationError::Terminal { .. } => "terminal",
            GenerationError::Timeout { .. } => "timeout",
            GenerationError::EmptyOutput => "empty_output",
            GenerationError::Deadline(_) => "deadline",
        }
    }
}
