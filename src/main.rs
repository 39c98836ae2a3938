//! fx-studio binary entrypoint.
//! Boots the Axum HTTP server with the feed, feedback and generation routes
//! plus `/metrics`.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fx_studio::config::primary_token_from_env;
use fx_studio::devlog::dev_logging_enabled;
use fx_studio::metrics::Metrics;
use fx_studio::{build_state, router, StudioConfig};

/// Compact tracing logs in development only (STUDIO_DEV_LOG=1 + dev env).
fn enable_dev_tracing() {
    if !dev_logging_enabled() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("feed=debug,generation=debug,signals=info,api=info,warn"));

    // Shuttle may already have installed a subscriber; keep whichever came first.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = StudioConfig::from_env();
    let state = build_state(cfg, primary_token_from_env()).context("building app state")?;
    let metrics = Metrics::init()?;

    let app = router(state).merge(metrics.router());
    Ok(app.into())
}
