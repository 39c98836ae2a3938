//! Primary image provider: job submission + status, behind a trait so the
//! orchestrator and poller can run against a scripted provider in tests.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::generate::error::GenerationError;

/// Provider-side job lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    /// Anything the provider adds later; treated as still running.
    #[serde(other)]
    Unknown,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed | JobState::Canceled)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Starting => "starting",
            JobState::Processing => "processing",
            JobState::Succeeded => "succeeded",
            JobState::Failed => "failed",
            JobState::Canceled => "canceled",
            JobState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One status snapshot of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionStatus {
    pub id: String,
    pub status: JobState,
    #[serde(default)]
    pub output: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Model input sent on submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    pub prompt: String,
    pub negative_prompt: String,
    pub num_outputs: u32,
    pub image_dimensions: String,
}

#[async_trait]
pub trait PredictionApi: Send + Sync {
    /// Submit a job, returning the provider-assigned id.
    async fn submit(&self, input: &PredictionInput) -> Result<String, GenerationError>;
    async fn status(&self, id: &str) -> Result<PredictionStatus, GenerationError>;
    fn name(&self) -> &'static str;
}

/// Replicate predictions API (`POST /predictions`, `GET /predictions/{id}`).
pub struct ReplicateClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    version: String,
}

impl ReplicateClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .user_agent("fx-studio/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            version: version.into(),
        })
    }

    fn auth(&self) -> String {
        format!("Token {}", self.token)
    }
}

#[async_trait]
impl PredictionApi for ReplicateClient {
    async fn submit(&self, input: &PredictionInput) -> Result<String, GenerationError> {
        #[derive(Serialize)]
        struct Req<'a> {
            version: &'a str,
            input: &'a PredictionInput,
        }
        #[derive(Deserialize)]
        struct Resp {
            id: String,
        }

        let resp = self
            .http
            .post(format!("{}/predictions", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&Req {
                version: &self.version,
                input,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }
        let body: Resp = resp.json().await?;
        Ok(body.id)
    }

    async fn status(&self, id: &str) -> Result<PredictionStatus, GenerationError> {
        let resp = self
            .http
            .get(format!("{}/predictions/{}", self.base_url, id))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }
        Ok(resp.json().await?)
    }

    fn name(&self) -> &'static str {
        "replicate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_payload_parses_known_and_unknown_states() {
        let s: PredictionStatus = serde_json::from_str(
            r#"{"id":"p1","status":"succeeded","output":["https://x/1.png"]}"#,
        )
        .unwrap();
        assert_eq!(s.status, JobState::Succeeded);
        assert_eq!(s.output.unwrap().len(), 1);

        let s: PredictionStatus =
            serde_json::from_str(r#"{"id":"p1","status":"queued","output":null}"#).unwrap();
        assert_eq!(s.status, JobState::Unknown);
        assert!(!s.status.is_terminal());
    }

    #[test]
    fn terminal_states() {
        assert!(JobState::Failed.is_terminal());
        assert!(JobState::Canceled.is_terminal());
        assert!(!JobState::Processing.is_terminal());
        assert_eq!(JobState::Canceled.to_string(), "canceled");
    }
}
