//! Adaptive relevance feed: scorer, threshold adapter, ranker, service, cadence.

pub mod cadence;
pub mod rank;
pub mod scoring;
pub mod service;
pub mod threshold;

pub use rank::{rank_articles, RankedArticle, Ranking};
pub use scoring::{boost_from_signals, boosted_relevance};
pub use service::FeedService;
pub use threshold::{adaptive_threshold, ThresholdConfig};
