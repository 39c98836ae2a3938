// tests/cadence_refresh.rs
//
// Digest cadence on tokio's paused clock: ticks, fresh ids, skipped failures,
// and teardown when the handle goes away.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::mpsc;

use fx_studio::config::FeedConfig;
use fx_studio::feed::cadence::{spawn_refresh, DigestFrequency};
use fx_studio::feed::FeedService;
use fx_studio::news::{CandidateArticle, NewsQuery, NewsSource};
use fx_studio::SignalStore;

/// Returns one more article on every call; fails on the calls listed in `fail_on`.
struct Growing {
    calls: AtomicUsize,
    fail_on: Vec<usize>,
}

fn article(i: usize) -> CandidateArticle {
    CandidateArticle {
        id: format!("n{i}"),
        title: format!("Headline {i}"),
        summary: None,
        content: None,
        published_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
        source: "Newswire".into(),
        base_relevance: 70.0,
        sentiment: "neutral".into(),
        pairs: ["EUR/USD".to_string()].into(),
        topics: Default::default(),
        url: String::new(),
    }
}

#[async_trait]
impl NewsSource for Growing {
    async fn fetch(&self, _q: &NewsQuery) -> anyhow::Result<Vec<CandidateArticle>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&call) {
            anyhow::bail!("flaky upstream");
        }
        Ok((0..=call).map(article).collect())
    }
    fn name(&self) -> &'static str {
        "growing"
    }
}

fn feed(fail_on: Vec<usize>) -> Arc<FeedService> {
    let src = Growing {
        calls: AtomicUsize::new(0),
        fail_on,
    };
    Arc::new(FeedService::new(Arc::new(src), FeedConfig::default()))
}

#[tokio::test(start_paused = true)]
async fn emits_immediately_then_on_interval_with_fresh_ids() {
    let (tx, mut rx) = mpsc::channel(4);
    let _handle = spawn_refresh(
        feed(vec![]),
        Arc::new(SignalStore::new()),
        NewsQuery::default(),
        DigestFrequency::Realtime,
        tx,
    );

    let started = tokio::time::Instant::now();
    let first = rx.recv().await.unwrap();
    assert_eq!(first.fresh_ids, ["n0"]);
    assert_eq!(first.threshold, 55.0);
    assert_eq!(started.elapsed(), Duration::ZERO);

    let second = rx.recv().await.unwrap();
    assert_eq!(second.articles.len(), 2);
    assert_eq!(second.fresh_ids, ["n1"]);
    assert_eq!(started.elapsed(), Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn failed_tick_is_skipped() {
    let (tx, mut rx) = mpsc::channel(4);
    let _handle = spawn_refresh(
        feed(vec![1]),
        Arc::new(SignalStore::new()),
        NewsQuery::default(),
        DigestFrequency::Standard,
        tx,
    );

    let started = tokio::time::Instant::now();
    assert_eq!(rx.recv().await.unwrap().fresh_ids, ["n0"]);

    // call #1 fails, call #2 lands one interval later
    let next = rx.recv().await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(120));
    assert_eq!(next.fresh_ids, ["n1", "n2"]);
}

/// Alternates between `[n0, n1]` and `[n1]`.
struct Flapping {
    calls: AtomicUsize,
}

#[async_trait]
impl NewsSource for Flapping {
    async fn fetch(&self, _q: &NewsQuery) -> anyhow::Result<Vec<CandidateArticle>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(if call % 2 == 0 {
            vec![article(0), article(1)]
        } else {
            vec![article(1)]
        })
    }
    fn name(&self) -> &'static str {
        "flapping"
    }
}

#[tokio::test(start_paused = true)]
async fn fresh_ids_are_relative_to_the_previous_update() {
    let src = Flapping {
        calls: AtomicUsize::new(0),
    };
    let feed = Arc::new(FeedService::new(Arc::new(src), FeedConfig::default()));
    let (tx, mut rx) = mpsc::channel(4);
    let _handle = spawn_refresh(
        feed,
        Arc::new(SignalStore::new()),
        NewsQuery::default(),
        DigestFrequency::Realtime,
        tx,
    );

    assert_eq!(rx.recv().await.unwrap().fresh_ids, ["n0", "n1"]);
    assert!(rx.recv().await.unwrap().fresh_ids.is_empty());
    // n0 dropped out for one tick, so it counts as fresh again
    assert_eq!(rx.recv().await.unwrap().fresh_ids, ["n0"]);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_timer() {
    let (tx, mut rx) = mpsc::channel(4);
    let handle = spawn_refresh(
        feed(vec![]),
        Arc::new(SignalStore::new()),
        NewsQuery::default(),
        DigestFrequency::Realtime,
        tx,
    );
    assert!(rx.recv().await.is_some());

    handle.stop();
    // the aborted task drops its sender, closing the channel
    assert!(rx.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn refresher_exits_when_consumer_goes_away() {
    let (tx, rx) = mpsc::channel(1);
    let handle = spawn_refresh(
        feed(vec![]),
        Arc::new(SignalStore::new()),
        NewsQuery::default(),
        DigestFrequency::Realtime,
        tx,
    );
    drop(rx);

    tokio::time::sleep(Duration::from_secs(16)).await;
    assert!(handle.is_finished());
}
