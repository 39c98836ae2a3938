use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::feed::{adaptive_threshold, FeedService, Ranking};
use crate::generate::{prompt_preview, GenerationRequest, GenerationResult, Orchestrator};
use crate::news::NewsQuery;
use crate::signals::{FeedbackSignal, SignalStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SignalStore>,
    pub feed: Arc<FeedService>,
    pub generator: Arc<Orchestrator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/news", post(rank_news))
        .route("/feedback", post(record_feedback))
        .route("/feedback/threshold", get(current_threshold))
        .route("/players", post(generate_player))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

async fn rank_news(State(state): State<AppState>, Json(query): Json<NewsQuery>) -> Response {
    match state.feed.rank(&state.store, query).await {
        Ok(ranking) => Json::<Ranking>(ranking).into_response(),
        Err(e) => {
            warn!(target: "api", "news ranking failed: {e:#}");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: format!("{e:#}"),
                }),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackReq {
    article_id: String,
    helpful: bool,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default, alias = "currencyPairs")]
    pairs: BTreeSet<String>,
    #[serde(default)]
    topics: BTreeSet<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdResp {
    pub threshold: f64,
    pub signals: usize,
}

async fn record_feedback(
    State(state): State<AppState>,
    Json(body): Json<FeedbackReq>,
) -> Json<ThresholdResp> {
    let now = now_ms();
    let signal = FeedbackSignal {
        article_id: body.article_id,
        helpful: body.helpful,
        // future-dated feedback would never decay
        timestamp: body.timestamp.map_or(now, |ts| ts.min(now)),
        pairs: body.pairs,
        topics: body.topics,
    };
    info!(
        target: "signals",
        article = %crate::devlog::anon_hash(&signal.article_id),
        helpful = signal.helpful,
        "feedback recorded"
    );
    state.store.record(signal);
    Json(threshold_snapshot(&state, now))
}

async fn current_threshold(State(state): State<AppState>) -> Json<ThresholdResp> {
    Json(threshold_snapshot(&state, now_ms()))
}

fn threshold_snapshot(state: &AppState, now: i64) -> ThresholdResp {
    state.store.expire(now);
    let history = state.store.all();
    ThresholdResp {
        threshold: adaptive_threshold(&history, now, &state.feed.config().threshold),
        signals: history.len(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResp {
    #[serde(flatten)]
    result: GenerationResult,
    prompt_preview: String,
}

async fn generate_player(
    State(state): State<AppState>,
    Json(req): Json<GenerationRequest>,
) -> Json<PlayerResp> {
    let result = state.generator.generate(req).await;
    let preview = prompt_preview(&result.blueprint);
    Json(PlayerResp {
        result,
        prompt_preview: preview,
    })
}
