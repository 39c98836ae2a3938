// src/feed/cadence.rs
//! Digest cadence: periodic re-ranking pushed to a consumer.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::feed::rank::RankedArticle;
use crate::feed::service::FeedService;
use crate::news::NewsQuery;
use crate::signals::SignalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFrequency {
    Realtime,
    Hourly,
    Daily,
    #[default]
    #[serde(other)]
    Standard,
}

impl DigestFrequency {
    pub fn interval(self) -> Duration {
        match self {
            DigestFrequency::Realtime => Duration::from_secs(15),
            DigestFrequency::Hourly => Duration::from_secs(60 * 60),
            DigestFrequency::Daily => Duration::from_secs(24 * 60 * 60),
            DigestFrequency::Standard => Duration::from_secs(60),
        }
    }
}

/// One refresh result.
#[derive(Debug, Clone)]
pub struct FeedUpdate {
    pub threshold: f64,
    pub articles: Vec<RankedArticle>,
    /// Ids that were not in this refresher's previous update.
    pub fresh_ids: Vec<String>,
}

/// Owns the refresh task; dropping it stops the timer.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(self) {
        // Drop does the work.
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a recurring ranking pass. The first tick fires immediately.
///
/// A failing tick is logged and skipped; the loop ends when the receiver is dropped.
pub fn spawn_refresh(
    feed: Arc<FeedService>,
    store: Arc<SignalStore>,
    query: NewsQuery,
    frequency: DigestFrequency,
    tx: mpsc::Sender<FeedUpdate>,
) -> RefreshHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(frequency.interval());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut seen: HashSet<String> = HashSet::new();

        loop {
            ticker.tick().await;

            let ranking = match feed.rank(&store, query.clone()).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(target: "feed", "refresh tick failed: {e:#}");
                    continue;
                }
            };

            let fresh_ids: Vec<String> = ranking
                .articles
                .iter()
                .map(|r| &r.article.id)
                .filter(|id| !seen.contains(*id))
                .cloned()
                .collect();
            // only the current list is remembered
            seen = ranking.articles.iter().map(|r| r.article.id.clone()).collect();

            tracing::debug!(
                target: "feed",
                kept = ranking.articles.len(),
                fresh = fresh_ids.len(),
                ?frequency,
                "refresh tick"
            );

            let update = FeedUpdate {
                threshold: ranking.threshold,
                articles: ranking.articles,
                fresh_ids,
            };
            if tx.send(update).await.is_err() {
                break;
            }
        }
    });
    RefreshHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_match_cadence() {
        assert_eq!(DigestFrequency::Realtime.interval(), Duration::from_secs(15));
        assert_eq!(DigestFrequency::Hourly.interval(), Duration::from_secs(3600));
        assert_eq!(DigestFrequency::Daily.interval(), Duration::from_secs(86_400));
        assert_eq!(DigestFrequency::default().interval(), Duration::from_secs(60));
    }

    #[test]
    fn unknown_cadence_parses_as_standard() {
        let f: DigestFrequency = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(f, DigestFrequency::Standard);
        let f: DigestFrequency = serde_json::from_str("\"hourly\"").unwrap();
        assert_eq!(f, DigestFrequency::Hourly);
    }
}
