//! Article ranker: score, gate on the adaptive threshold, order.
//!
//! Ordering: boosted relevance desc, then newer `publishedAt` first, then
//! article id asc so identical inputs always produce identical output.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::feed::scoring::boosted_relevance;
use crate::feed::threshold::{adaptive_threshold, ThresholdConfig};
use crate::news::CandidateArticle;
use crate::signals::FeedbackSignal;

/// Candidate plus its derived score. Provenance (`baseRelevance`) is untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedArticle {
    #[serde(flatten)]
    pub article: CandidateArticle,
    pub boosted_relevance: f64,
}

/// Output of one ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub threshold: f64,
    pub articles: Vec<RankedArticle>,
}

fn by_rank(a: &RankedArticle, b: &RankedArticle) -> Ordering {
    b.boosted_relevance
        .total_cmp(&a.boosted_relevance)
        .then_with(|| b.article.published_at.cmp(&a.article.published_at))
        .then_with(|| a.article.id.cmp(&b.article.id))
}

/// Pure projection of (candidates, history, now) to the presented list.
///
/// `signals` is walked once for the threshold and once per candidate, hence `Copy`
/// (a slice or a store snapshot reference).
pub fn rank_articles<'a, S>(
    candidates: Vec<CandidateArticle>,
    signals: S,
    now_ms: i64,
    cfg: &ThresholdConfig,
) -> Ranking
where
    S: IntoIterator<Item = &'a FeedbackSignal> + Copy,
{
    let threshold = adaptive_threshold(signals, now_ms, cfg);
    let total = candidates.len();

    let mut articles: Vec<RankedArticle> = candidates
        .into_iter()
        .map(|article| {
            let boosted = boosted_relevance(&article, signals, now_ms);
            RankedArticle {
                article,
                boosted_relevance: boosted,
            }
        })
        .filter(|r| r.boosted_relevance >= threshold)
        .collect();

    articles.sort_by(by_rank);

    debug!(target: "feed", total, kept = articles.len(), threshold, "ranking pass");

    Ranking {
        threshold,
        articles,
    }
}
