// src/devlog.rs
//! Dev-only diagnostics: env gate + anonymised ids for per-article logs.

use sha2::{Digest, Sha256};
use tracing::info;

use crate::feed::rank::RankedArticle;

pub const ENV_DEV_LOG: &str = "STUDIO_DEV_LOG";

/// STUDIO_DEV_LOG=1 AND dev env (debug build or SHUTTLE_ENV in {local,development,dev}).
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of SHA-256, hex encoded.
pub fn anon_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Log the top of a ranking pass. Never logs raw titles.
pub fn dev_log_ranking(articles: &[RankedArticle], threshold: f64) {
    if !dev_logging_enabled() {
        return;
    }
    for r in articles.iter().take(5) {
        let id = anon_hash(&r.article.title);
        info!(
            target: "feed",
            %id,
            base = r.article.base_relevance,
            boosted = r.boosted_relevance,
            threshold,
            "ranked"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("ECB holds rates");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_hash("ECB holds rates"));
        assert_ne!(a, anon_hash("ECB cuts rates"));
    }
}
