// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod devlog;
pub mod feed;
pub mod generate;
pub mod metrics;
pub mod news;
pub mod signals;
pub mod video;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::StudioConfig;
pub use crate::signals::{FeedbackSignal, SignalSnapshot, SignalStore};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::news::http::HttpNewsSource;
use crate::news::static_source::StaticNewsSource;
use crate::news::NewsSource;

/// Pick the news source: HTTP endpoint if configured, else the JSON fixture,
/// else an empty source (the feed still serves, just with nothing in it).
pub fn news_source_from_config(cfg: &config::NewsConfig) -> anyhow::Result<Arc<dyn NewsSource>> {
    if let Some(endpoint) = cfg.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
        info!(target: "feed", %endpoint, "using HTTP news source");
        let src = HttpNewsSource::new(endpoint, Duration::from_millis(cfg.timeout_ms))?;
        return Ok(Arc::new(src));
    }
    match StaticNewsSource::from_json_file(Path::new(&cfg.fixture_path)) {
        Ok(src) => {
            info!(target: "feed", path = %cfg.fixture_path, "using fixture news source");
            Ok(Arc::new(src))
        }
        Err(e) => {
            warn!(target: "feed", "no news fixture, serving an empty feed: {e:#}");
            Ok(Arc::new(StaticNewsSource::new(Vec::new())))
        }
    }
}

/// Build the full application state from config + primary credential.
pub fn build_state(cfg: StudioConfig, token: Option<String>) -> anyhow::Result<AppState> {
    let source = news_source_from_config(&cfg.news)?;
    let generator = generate::Orchestrator::from_config(cfg.generation, token)?;
    if !generator.has_primary() {
        info!(target: "generation", "no primary credential, images come from the fallback provider");
    }
    Ok(AppState {
        store: Arc::new(SignalStore::new()),
        feed: Arc::new(feed::FeedService::new(source, cfg.feed)),
        generator: Arc::new(generator),
    })
}
