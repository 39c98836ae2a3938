//! Generation orchestrator: primary provider with transparent fallback.
//!
//! 1. seed blueprint + caller overrides
//! 2. no primary credential -> fallback (`fallback-default`)
//! 3. submit + poll on the primary; any error or empty output ->
//!    fallback (`fallback-degraded`)
//!
//! The caller always gets a result.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GenerationConfig;
use crate::generate::blueprint::{Blueprint, BlueprintOverrides};
use crate::generate::error::GenerationError;
use crate::generate::fallback::FallbackProvider;
use crate::generate::poller::{poll_prediction, PollPolicy};
use crate::generate::prompt::{build_prompt, NEGATIVE_PROMPT};
use crate::generate::provider::{PredictionApi, PredictionInput, ReplicateClient};

/// Which path produced the images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderTag {
    PrimarySuccess,
    FallbackDefault,
    FallbackDegraded,
}

impl ProviderTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderTag::PrimarySuccess => "primary-success",
            ProviderTag::FallbackDefault => "fallback-default",
            ProviderTag::FallbackDegraded => "fallback-degraded",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationRequest {
    pub seed: Option<u64>,
    #[serde(alias = "attributes")]
    pub attribute_overrides: Option<BlueprintOverrides>,
    pub image_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub blueprint: Blueprint,
    pub images: Vec<String>,
    pub provider: ProviderTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

pub struct Orchestrator {
    primary: Option<Arc<dyn PredictionApi>>,
    fallback: FallbackProvider,
    cfg: GenerationConfig,
}

impl Orchestrator {
    pub fn new(
        primary: Option<Arc<dyn PredictionApi>>,
        cfg: GenerationConfig,
    ) -> anyhow::Result<Self> {
        let fallback = FallbackProvider::new(&cfg.fallback_endpoint)?;
        Ok(Self {
            primary,
            fallback,
            cfg,
        })
    }

    /// Wire the Replicate client when a token is present.
    pub fn from_config(cfg: GenerationConfig, token: Option<String>) -> anyhow::Result<Self> {
        let primary: Option<Arc<dyn PredictionApi>> = match token {
            Some(t) => Some(Arc::new(ReplicateClient::new(
                &cfg.primary_base_url,
                t,
                &cfg.model_version,
            )?)),
            None => None,
        };
        Self::new(primary, cfg)
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.cfg.poll_interval(),
            max_attempts: self.cfg.max_poll_attempts.max(1),
        }
    }

    /// Hard ceiling for the whole primary path (submit + polling).
    pub fn primary_deadline(&self) -> Duration {
        let policy = self.poll_policy();
        self.cfg.submit_budget() + policy.window() + policy.interval
    }

    pub async fn generate(&self, req: GenerationRequest) -> GenerationResult {
        crate::metrics::ensure_described();

        let seed = req
            .seed
            .unwrap_or_else(|| rand::random_range(0..1_000_000u64));
        let count = self.cfg.clamp_image_count(req.image_count);
        let base = Blueprint::from_seed(seed);
        let blueprint = match &req.attribute_overrides {
            Some(o) => base.merged(o),
            None => base,
        };

        let Some(api) = self.primary.as_deref() else {
            return self.fallback_result(blueprint, seed, count, ProviderTag::FallbackDefault);
        };

        let attempt = tokio::time::timeout(
            self.primary_deadline(),
            self.run_primary(api, &blueprint, count),
        )
        .await
        .unwrap_or_else(|_| Err(GenerationError::Deadline(self.primary_deadline())));

        match attempt {
            Ok((images, job_id)) => {
                info!(
                    target: "generation",
                    provider = api.name(),
                    %job_id,
                    images = images.len(),
                    "primary generation succeeded"
                );
                counter!("generation_requests_total", "provider" => ProviderTag::PrimarySuccess.as_str())
                    .increment(1);
                GenerationResult {
                    blueprint,
                    images,
                    provider: ProviderTag::PrimarySuccess,
                    job_id: Some(job_id),
                }
            }
            Err(e) => {
                warn!(
                    target: "generation",
                    provider = api.name(),
                    kind = e.kind(),
                    "primary generation failed, degrading to fallback: {e}"
                );
                counter!("generation_primary_errors_total", "kind" => e.kind()).increment(1);
                self.fallback_result(blueprint, seed, count, ProviderTag::FallbackDegraded)
            }
        }
    }

    async fn run_primary(
        &self,
        api: &dyn PredictionApi,
        blueprint: &Blueprint,
        count: u32,
    ) -> Result<(Vec<String>, String), GenerationError> {
        let input = PredictionInput {
            prompt: build_prompt(blueprint),
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            num_outputs: count,
            image_dimensions: self.cfg.image_dimensions.clone(),
        };

        let job_id = api.submit(&input).await?;
        let images = poll_prediction(api, &job_id, self.poll_policy()).await?;
        if images.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }
        Ok((images, job_id))
    }

    fn fallback_result(
        &self,
        blueprint: Blueprint,
        seed: u64,
        count: u32,
        tag: ProviderTag,
    ) -> GenerationResult {
        let images = self.fallback.urls(&blueprint, seed, count);
        counter!("generation_requests_total", "provider" => tag.as_str()).increment(1);
        GenerationResult {
            blueprint,
            images,
            provider: tag,
            job_id: None,
        }
    }
}
