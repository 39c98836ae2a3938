//! Feedback-driven relevance boost.
//!
//! Each signal contributes `overlap × weight × decay`:
//! - `overlap` : shared pairs + shared topics (plain cardinality)
//! - `weight`  : +12 for helpful, −10 for unhelpful
//! - `decay`   : linear ramp from 1 (fresh) to 0 at the 72 h horizon
//!
//! Pure function of (article, history, now). No hidden state.

use std::time::Duration;

use crate::news::CandidateArticle;
use crate::signals::FeedbackSignal;

pub const HELPFUL_WEIGHT: f64 = 12.0;
pub const UNHELPFUL_WEIGHT: f64 = -10.0;

/// Age at which a signal stops contributing.
pub const DECAY_HORIZON: Duration = Duration::from_secs(72 * 3600);

pub fn overlap(signal: &FeedbackSignal, article: &CandidateArticle) -> usize {
    signal.pairs.intersection(&article.pairs).count()
        + signal.topics.intersection(&article.topics).count()
}

/// Linear decay in [0, 1]. Future-dated signals count as fresh.
pub fn decay(signal_ts_ms: i64, now_ms: i64) -> f64 {
    let elapsed = now_ms.saturating_sub(signal_ts_ms).max(0) as f64;
    let horizon = DECAY_HORIZON.as_millis() as f64;
    (1.0 - elapsed / horizon).max(0.0)
}

pub fn signal_weight(signal: &FeedbackSignal) -> f64 {
    if signal.helpful {
        HELPFUL_WEIGHT
    } else {
        UNHELPFUL_WEIGHT
    }
}

/// Signed sum of all signal contributions (unclamped).
pub fn boost_from_signals<'a, S>(article: &CandidateArticle, signals: S, now_ms: i64) -> f64
where
    S: IntoIterator<Item = &'a FeedbackSignal>,
{
    signals
        .into_iter()
        .map(|s| {
            let d = decay(s.timestamp, now_ms);
            if d == 0.0 {
                return 0.0;
            }
            overlap(s, article) as f64 * signal_weight(s) * d
        })
        .sum()
}

/// `clamp(baseRelevance + boost, 0, 100)`.
pub fn boosted_relevance<'a, S>(article: &CandidateArticle, signals: S, now_ms: i64) -> f64
where
    S: IntoIterator<Item = &'a FeedbackSignal>,
{
    (article.base_relevance + boost_from_signals(article, signals, now_ms)).clamp(0.0, 100.0)
}
