// src/metrics.rs
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// Register metric descriptions once per process. Safe to call from hot paths.
pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_rank_requests_total", "Ranking operations served.");
        describe_histogram!(
            "feed_articles_kept",
            "Articles left after threshold filtering and truncation."
        );
        describe_gauge!(
            "feed_adaptive_threshold",
            "Adaptive relevance threshold from the last ranking."
        );
        describe_counter!("feedback_signals_total", "Feedback signals recorded.");
        describe_counter!(
            "generation_requests_total",
            "Player generations by provider tag."
        );
        describe_counter!(
            "generation_primary_errors_total",
            "Primary provider failures by kind (each one degrades to fallback)."
        );
        describe_histogram!(
            "generation_poll_attempts",
            "Status polls spent per primary job."
        );
        describe_counter!("news_source_errors_total", "Failed news source fetches.");
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if one is already installed.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
