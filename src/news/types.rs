// src/news/types.rs
use std::collections::BTreeSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One news item as produced by a news source. Read-only inside the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateArticle {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub source: String,
    /// 0..=100, supplied by the source.
    #[serde(default, alias = "relevanceScore")]
    pub base_relevance: f64,
    #[serde(default = "default_sentiment")]
    pub sentiment: String,
    #[serde(default, alias = "currencyPairs")]
    pub pairs: BTreeSet<String>,
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(default)]
    pub url: String,
}

fn default_sentiment() -> String {
    "neutral".to_string()
}

/// Interest filter forwarded to the source. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairs: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// External news collaborator. May return fewer or more items than `limit`.
#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<CandidateArticle>>;
    fn name(&self) -> &'static str;
}
