// tests/feed_scenarios.rs
//
// End-to-end ranking scenarios on the pure feed functions with a fixed clock.

use chrono::{TimeZone, Utc};

use fx_studio::feed::{adaptive_threshold, boosted_relevance, rank_articles, ThresholdConfig};
use fx_studio::news::CandidateArticle;
use fx_studio::signals::{FeedbackSignal, SignalStore};

const NOW: i64 = 1_760_000_000_000;
const HOUR_MS: i64 = 3_600_000;

fn article(id: &str, base: f64, hour: u32, pairs: &[&str], topics: &[&str]) -> CandidateArticle {
    CandidateArticle {
        id: id.into(),
        title: format!("Story {id}"),
        summary: None,
        content: None,
        published_at: Utc.with_ymd_and_hms(2025, 10, 9, hour, 0, 0).unwrap(),
        source: "Newswire".into(),
        base_relevance: base,
        sentiment: "neutral".into(),
        pairs: pairs.iter().map(|s| s.to_string()).collect(),
        topics: topics.iter().map(|s| s.to_string()).collect(),
        url: format!("https://news.example.com/{id}"),
    }
}

#[test]
fn one_fresh_helpful_signal_on_both_tags_adds_24() {
    let store = SignalStore::new();
    store.record(FeedbackSignal::new(
        "seen",
        true,
        NOW,
        ["EUR/USD"],
        ["Monetary Policy"],
    ));
    let a = article("eur", 50.0, 9, &["EUR/USD"], &["Monetary Policy"]);

    assert_eq!(boosted_relevance(&a, &store.all(), NOW), 74.0);
}

#[test]
fn empty_history_is_a_no_op() {
    let a = article("x", 63.5, 9, &["GBP/USD"], &["inflation"]);
    assert_eq!(boosted_relevance(&a, &[], NOW), 63.5);
}

#[test]
fn stale_signals_contribute_nothing() {
    let stale = FeedbackSignal::new("old", false, NOW - 73 * HOUR_MS, ["EUR/USD"], ["rates"]);
    let a = article("x", 60.0, 9, &["EUR/USD"], &["rates"]);
    assert_eq!(boosted_relevance(&a, &[stale.clone()], NOW), 60.0);
    assert_eq!(adaptive_threshold(&[stale], NOW, &ThresholdConfig::default()), 55.0);
}

#[test]
fn half_decayed_signal_counts_half() {
    let s = FeedbackSignal::new("s", true, NOW - 36 * HOUR_MS, ["EUR/USD"], Vec::<String>::new());
    let a = article("x", 40.0, 9, &["EUR/USD"], &[]);
    assert!((boosted_relevance(&a, &[s], NOW) - 46.0).abs() < 1e-9);
}

#[test]
fn overlap_is_monotonic_for_both_polarities() {
    let helpful = FeedbackSignal::new("h", true, NOW, ["EUR/USD", "USD/JPY"], ["rates"]);
    let unhelpful = FeedbackSignal {
        helpful: false,
        ..helpful.clone()
    };

    let none = article("0", 50.0, 9, &[], &[]);
    let one = article("1", 50.0, 9, &["EUR/USD"], &[]);
    let three = article("3", 50.0, 9, &["EUR/USD", "USD/JPY"], &["rates"]);

    let up: Vec<f64> = [&none, &one, &three]
        .iter()
        .map(|a| boosted_relevance(a, &[helpful.clone()], NOW))
        .collect();
    assert!(up.windows(2).all(|w| w[0] <= w[1]), "{up:?}");

    let down: Vec<f64> = [&none, &one, &three]
        .iter()
        .map(|a| boosted_relevance(a, &[unhelpful.clone()], NOW))
        .collect();
    assert!(down.windows(2).all(|w| w[0] >= w[1]), "{down:?}");
}

#[test]
fn ranking_is_sorted_and_deterministic() {
    let store = SignalStore::new();
    store.record(FeedbackSignal::new("a", true, NOW - HOUR_MS, ["EUR/USD"], ["rates"]));
    store.record(FeedbackSignal::new("b", false, NOW - 2 * HOUR_MS, ["AUD/USD"], Vec::<String>::new()));
    store.record(FeedbackSignal::new("a", true, NOW, ["EUR/USD"], Vec::<String>::new()));

    let candidates = vec![
        article("eur-1", 58.0, 8, &["EUR/USD"], &["rates"]),
        article("eur-2", 58.0, 10, &["EUR/USD"], &["rates"]),
        article("aud", 80.0, 9, &["AUD/USD"], &[]),
        article("jpy", 70.0, 7, &["USD/JPY"], &[]),
        article("chf", 20.0, 6, &["USD/CHF"], &[]),
    ];

    let cfg = ThresholdConfig::default();
    let first = rank_articles(candidates.clone(), &store.all(), NOW, &cfg);
    let second = rank_articles(candidates, &store.all(), NOW, &cfg);
    assert_eq!(first, second);

    let scores: Vec<f64> = first.articles.iter().map(|r| r.boosted_relevance).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    assert!(scores.iter().all(|s| *s >= first.threshold));

    // equal boosted scores: newer publishedAt first
    let ids: Vec<&str> = first.articles.iter().map(|r| r.article.id.as_str()).collect();
    let p2 = ids.iter().position(|i| *i == "eur-2").unwrap();
    let p1 = ids.iter().position(|i| *i == "eur-1").unwrap();
    assert!(p2 < p1, "{ids:?}");
    assert!(!ids.contains(&"chf"));
}

#[test]
fn threshold_relaxes_as_helpful_ratio_rises() {
    let cfg = ThresholdConfig::default();
    let mut last = f64::INFINITY;
    for helpful in 0..=10 {
        let history: Vec<FeedbackSignal> = (0..10)
            .map(|i| FeedbackSignal::new(format!("a{i}"), i < helpful, NOW, ["EUR/USD"], Vec::<String>::new()))
            .collect();
        let t = adaptive_threshold(&history, NOW, &cfg);
        assert!(t <= last, "helpful={helpful} t={t} last={last}");
        assert!((cfg.min..=cfg.max).contains(&t));
        last = t;
    }
}

#[test]
fn threshold_stays_bounded_under_volume() {
    let cfg = ThresholdConfig::default();
    let all_helpful: Vec<_> = (0..5_000)
        .map(|i| FeedbackSignal::new(format!("h{i}"), true, NOW, Vec::<String>::new(), Vec::<String>::new()))
        .collect();
    let all_unhelpful: Vec<_> = all_helpful
        .iter()
        .cloned()
        .map(|s| FeedbackSignal { helpful: false, ..s })
        .collect();

    for history in [&all_helpful[..], &all_unhelpful[..], &[][..]] {
        let t = adaptive_threshold(history, NOW, &cfg);
        assert!((20.0..=90.0).contains(&t), "t={t}");
    }
}

#[test]
fn empty_candidates_yield_empty_ranking() {
    let out = rank_articles(Vec::new(), &[], NOW, &ThresholdConfig::default());
    assert!(out.articles.is_empty());
    assert_eq!(out.threshold, 55.0);
}
