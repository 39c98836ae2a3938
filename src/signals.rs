//! # Signal Store
//! Append-only, in-memory log of explicit user feedback.
//!
//! The log is a list of fixed-size chunks, each behind its own `Arc`. A reader
//! snapshot clones the chunk pointers only, then works without any lock. An
//! append touches the tail chunk alone, so a held snapshot costs the writer at
//! most one chunk copy instead of the whole history.

use std::collections::BTreeSet;
use std::iter::FlatMap;
use std::slice;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::feed::scoring::DECAY_HORIZON;

/// One user reaction to an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSignal {
    pub article_id: String,
    pub helpful: bool,
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub pairs: BTreeSet<String>,
    #[serde(default)]
    pub topics: BTreeSet<String>,
}

impl FeedbackSignal {
    pub fn new<P, T>(
        article_id: impl Into<String>,
        helpful: bool,
        timestamp: i64,
        pairs: P,
        topics: T,
    ) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            article_id: article_id.into(),
            helpful,
            timestamp,
            pairs: pairs.into_iter().map(Into::into).collect(),
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }
}

/// Signals per chunk. Bounds the copy an append pays while a snapshot is held.
const CHUNK_LEN: usize = 256;

type Chunk = Arc<Vec<FeedbackSignal>>;

/// Thread-safe append-only feedback history, oldest first.
///
/// No deduplication: the same article flagged twice counts twice.
#[derive(Debug, Default)]
pub struct SignalStore {
    chunks: RwLock<Vec<Chunk>>,
}

impl SignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, signal: FeedbackSignal) {
        tracing::debug!(
            target: "signals",
            article_id = %signal.article_id,
            helpful = signal.helpful,
            "feedback recorded"
        );
        {
            let mut chunks = self.chunks.write();
            if chunks.last().map_or(true, |c| c.len() >= CHUNK_LEN) {
                chunks.push(Arc::new(Vec::with_capacity(CHUNK_LEN)));
            }
            if let Some(tail) = chunks.last_mut() {
                Arc::make_mut(tail).push(signal);
            }
        }
        counter!("feedback_signals_total").increment(1);
    }

    /// Snapshot of the full history in insertion order.
    pub fn all(&self) -> SignalSnapshot {
        SignalSnapshot {
            chunks: self.chunks.read().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.read().iter().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.read().iter().all(|c| c.is_empty())
    }

    /// Drop signals older than `horizon` relative to `now_ms`. Returns how many were removed.
    pub fn prune_older_than(&self, horizon: Duration, now_ms: i64) -> usize {
        let cutoff = now_ms.saturating_sub(horizon.as_millis() as i64);
        let expired = |c: &Chunk| c.iter().any(|s| s.timestamp < cutoff);

        // Common case: nothing to drop, readers are never blocked.
        if !self.chunks.read().iter().any(expired) {
            return 0;
        }

        let mut chunks = self.chunks.write();
        let before: usize = chunks.iter().map(|c| c.len()).sum();
        for chunk in chunks.iter_mut().filter(|c| expired(c)) {
            Arc::make_mut(chunk).retain(|s| s.timestamp >= cutoff);
        }
        chunks.retain(|c| !c.is_empty());
        let after: usize = chunks.iter().map(|c| c.len()).sum();
        before - after
    }

    /// Drop everything past the scoring horizon; such signals no longer affect any score.
    pub fn expire(&self, now_ms: i64) -> usize {
        let removed = self.prune_older_than(DECAY_HORIZON, now_ms);
        if removed > 0 {
            tracing::debug!(target: "signals", removed, "expired feedback signals");
        }
        removed
    }
}

/// Point-in-time view of the store. Unaffected by later appends or pruning.
#[derive(Debug, Clone, Default)]
pub struct SignalSnapshot {
    chunks: Vec<Chunk>,
}

pub type SnapshotIter<'a> = FlatMap<
    slice::Iter<'a, Chunk>,
    slice::Iter<'a, FeedbackSignal>,
    fn(&'a Chunk) -> slice::Iter<'a, FeedbackSignal>,
>;

fn chunk_iter(chunk: &Chunk) -> slice::Iter<'_, FeedbackSignal> {
    chunk.iter()
}

impl SignalSnapshot {
    pub fn iter<'a>(&'a self) -> SnapshotIter<'a> {
        self.chunks
            .iter()
            .flat_map(chunk_iter as fn(&'a Chunk) -> slice::Iter<'a, FeedbackSignal>)
    }

    pub fn len(&self) -> usize {
        self.chunks.iter().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a SignalSnapshot {
    type Item = &'a FeedbackSignal;
    type IntoIter = SnapshotIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
