// src/news/http.rs
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::counter;

use crate::news::types::{CandidateArticle, NewsQuery, NewsSource};

/// Upstream JSON news endpoint. The query is POSTed as JSON and the response is
/// expected as `{ "articles": [...] }` or a bare array.
pub struct HttpNewsSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpNewsSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fx-studio/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .context("building news http client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum NewsPayload {
    Wrapped { articles: Vec<CandidateArticle> },
    Bare(Vec<CandidateArticle>),
}

#[async_trait]
impl NewsSource for HttpNewsSource {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<CandidateArticle>> {
        let resp = match self.client.post(&self.endpoint).json(query).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(target: "feed", error = ?e, provider = self.name(), "news http error");
                counter!("news_source_errors_total").increment(1);
                return Err(e).context("news http post()");
            }
        };
        let status = resp.status();
        if !status.is_success() {
            counter!("news_source_errors_total").increment(1);
            return Err(anyhow!("news source returned HTTP {status}"));
        }
        let payload: NewsPayload = resp.json().await.context("decoding news payload")?;
        let mut articles = match payload {
            NewsPayload::Wrapped { articles } | NewsPayload::Bare(articles) => articles,
        };
        articles.iter_mut().for_each(crate::news::normalize_article);
        Ok(articles)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
