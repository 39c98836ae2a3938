// src/config/mod.rs
//! Studio configuration: TOML file with serde defaults + env overrides.
//!
//! Lookup: $STUDIO_CONFIG_PATH, else `config/studio.toml`. A missing or
//! broken file falls back to defaults (logged). The primary-provider token is
//! never read from the file, only from `REPLICATE_API_TOKEN`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::feed::threshold::ThresholdConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/studio.toml";
pub const ENV_CONFIG_PATH: &str = "STUDIO_CONFIG_PATH";
pub const ENV_THRESHOLD_BASELINE: &str = "STUDIO_THRESHOLD_BASELINE";
pub const ENV_MAX_POLL_ATTEMPTS: &str = "STUDIO_MAX_POLL_ATTEMPTS";
pub const ENV_PRIMARY_TOKEN: &str = "REPLICATE_API_TOKEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub feed: FeedConfig,
    pub generation: GenerationConfig,
    pub news: NewsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub default_limit: usize,
    pub threshold: ThresholdConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            threshold: ThresholdConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    /// Budget for the submit call on top of the polling window.
    pub submit_budget_ms: u64,
    pub image_dimensions: String,
    pub default_image_count: u32,
    pub max_image_count: u32,
    pub model_version: String,
    pub primary_base_url: String,
    pub fallback_endpoint: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3_000,
            max_poll_attempts: 21,
            submit_budget_ms: 15_000,
            image_dimensions: "1024x1024".to_string(),
            default_image_count: 3,
            max_image_count: 6,
            // stable-diffusion-xl
            model_version: "d1d6037ebcf74b5698ce2b52e08d6c9b8d196327582f5ea18284d888fffbe148"
                .to_string(),
            primary_base_url: "https://api.replicate.com/v1".to_string(),
            fallback_endpoint: "https://api.dicebear.com/7.x/adventurer/png".to_string(),
        }
    }
}

impl GenerationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn submit_budget(&self) -> Duration {
        Duration::from_millis(self.submit_budget_ms)
    }

    /// Clamp a requested image count into `1..=max_image_count`.
    pub fn clamp_image_count(&self, requested: Option<u32>) -> u32 {
        let max = self.max_image_count.max(1);
        requested.unwrap_or(self.default_image_count).clamp(1, max)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Upstream JSON endpoint. `None` -> fixture file.
    pub endpoint: Option<String>,
    pub fixture_path: String,
    pub timeout_ms: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            fixture_path: "data/sample_news.json".to_string(),
            timeout_ms: 8_000,
        }
    }
}

impl StudioConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut cfg: StudioConfig = toml::from_str(raw).context("parsing studio config")?;
        cfg.feed.threshold = cfg.feed.threshold.sanitized();
        cfg.generation.max_poll_attempts = cfg.generation.max_poll_attempts.max(1);
        Ok(cfg)
    }

    /// File (env path or default) + env overrides. Never fails.
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = match Self::load_from_file(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("studio config unavailable, using defaults: {e:#}");
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        cfg
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(b) = parse_threshold_env(std::env::var(ENV_THRESHOLD_BASELINE).ok()) {
            self.feed.threshold.baseline = b;
            self.feed.threshold = self.feed.threshold.sanitized();
        }
        if let Some(n) = std::env::var(ENV_MAX_POLL_ATTEMPTS)
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
        {
            self.generation.max_poll_attempts = n.max(1);
        }
    }
}

// parse optional float env and clamp to <0.0..=100.0>
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 100.0))
}

/// Primary-provider credential; blank counts as absent.
pub fn primary_token_from_env() -> Option<String> {
    std::env::var(ENV_PRIMARY_TOKEN)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
