// src/news/mod.rs
pub mod http;
pub mod static_source;
pub mod types;

use once_cell::sync::OnceCell;
use regex::Regex;

pub use types::{CandidateArticle, NewsQuery, NewsSource};

/// Normalize display text: decode entities, strip tags, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // “ ” ‘ ’ « » -> ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }
    out
}

/// Normalize the text fields of a freshly fetched article in place.
pub fn normalize_article(a: &mut CandidateArticle) {
    a.title = normalize_text(&a.title);
    a.summary = a.summary.as_deref().map(normalize_text).filter(|s| !s.is_empty());
    a.content = a.content.as_deref().map(normalize_text).filter(|s| !s.is_empty());
    a.base_relevance = a.base_relevance.clamp(0.0, 100.0);
}
