// src/news/static_source.rs
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::news::types::{CandidateArticle, NewsQuery, NewsSource};

/// In-memory source, used for fixtures, local runs and tests.
///
/// Applies the query like a real upstream would: an article passes when it
/// shares at least one requested pair or topic (no filter when none given).
#[derive(Debug, Clone, Default)]
pub struct StaticNewsSource {
    articles: Vec<CandidateArticle>,
}

impl StaticNewsSource {
    pub fn new(articles: Vec<CandidateArticle>) -> Self {
        Self { articles }
    }

    /// Load a JSON array of articles (or `{ "articles": [...] }`) from disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading news fixture {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Fixture {
            Bare(Vec<CandidateArticle>),
            Wrapped { articles: Vec<CandidateArticle> },
        }
        let fx: Fixture = serde_json::from_str(raw).context("parsing news fixture json")?;
        let mut articles = match fx {
            Fixture::Bare(v) | Fixture::Wrapped { articles: v } => v,
        };
        articles.iter_mut().for_each(crate::news::normalize_article);
        Ok(Self::new(articles))
    }
}

fn matches(article: &CandidateArticle, query: &NewsQuery) -> bool {
    let pairs = query.pairs.as_ref().filter(|p| !p.is_empty());
    let topics = query.topics.as_ref().filter(|t| !t.is_empty());
    if pairs.is_none() && topics.is_none() {
        return true;
    }
    let hit_pair = pairs.is_some_and(|p| !p.is_disjoint(&article.pairs));
    let hit_topic = topics.is_some_and(|t| !t.is_disjoint(&article.topics));
    hit_pair || hit_topic
}

#[async_trait]
impl NewsSource for StaticNewsSource {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<CandidateArticle>> {
        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(self
            .articles
            .iter()
            .filter(|a| matches(a, query))
            .take(limit)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
