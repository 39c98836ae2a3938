// src/feed/service.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use metrics::{counter, gauge, histogram};

use crate::config::FeedConfig;
use crate::feed::rank::{rank_articles, Ranking};
use crate::news::{NewsQuery, NewsSource};
use crate::signals::SignalStore;

/// The outbound ranking operation: fetch → score → gate → order → truncate.
///
/// Holds no feedback state of its own; the store is passed per call and
/// signals past the decay horizon are expired from it before scoring.
#[derive(Clone)]
pub struct FeedService {
    source: Arc<dyn NewsSource>,
    cfg: FeedConfig,
}

impl FeedService {
    pub fn new(source: Arc<dyn NewsSource>, cfg: FeedConfig) -> Self {
        Self { source, cfg }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.cfg
    }

    pub async fn rank(&self, store: &SignalStore, query: NewsQuery) -> Result<Ranking> {
        self.rank_at(store, query, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// Same as [`FeedService::rank`] with an explicit clock, for tests.
    pub async fn rank_at(
        &self,
        store: &SignalStore,
        mut query: NewsQuery,
        now_ms: i64,
    ) -> Result<Ranking> {
        crate::metrics::ensure_described();
        counter!("feed_rank_requests_total").increment(1);

        let limit = query.limit.unwrap_or(self.cfg.default_limit);
        query.limit = Some(limit);

        let candidates = self
            .source
            .fetch(&query)
            .await
            .with_context(|| format!("fetching news from {}", self.source.name()))?;

        store.expire(now_ms);
        let history = store.all();
        let mut ranking = rank_articles(candidates, &history, now_ms, &self.cfg.threshold);
        ranking.articles.truncate(limit);

        gauge!("feed_adaptive_threshold").set(ranking.threshold);
        histogram!("feed_articles_kept").record(ranking.articles.len() as f64);
        crate::devlog::dev_log_ranking(&ranking.articles, ranking.threshold);

        Ok(ranking)
    }
}
