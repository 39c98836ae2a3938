// src/generate/fallback.rs
//! Deterministic avatar URLs. No network call, so this path cannot fail once
//! the endpoint has been validated at construction.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use reqwest::Url;

use crate::generate::blueprint::Blueprint;

#[derive(Debug, Clone)]
pub struct FallbackProvider {
    endpoint: Url,
}

impl FallbackProvider {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid fallback endpoint {endpoint}"))?;
        Ok(Self { endpoint })
    }

    /// Exactly `count` URLs, one per seed `seed + i`.
    pub fn urls(&self, blueprint: &Blueprint, seed: u64, count: u32) -> Vec<String> {
        let colors = background_param(&blueprint.club_colors);
        (0..count as u64)
            .map(|i| {
                let mut url = self.endpoint.clone();
                url.query_pairs_mut()
                    .clear()
                    .append_pair("seed", &seed.wrapping_add(i).to_string())
                    .append_pair("backgroundColor", &colors)
                    .append_pair("accessoriesProbability", "80");
                url.to_string()
            })
            .collect()
    }
}

/// Club colors with non-hex characters stripped, comma separated.
pub fn background_param(colors: &[String]) -> String {
    static NON_HEX: OnceCell<Regex> = OnceCell::new();
    let re = NON_HEX.get_or_init(|| Regex::new(r"[^0-9A-Fa-f]").unwrap());
    colors
        .iter()
        .map(|c| re.replace_all(c, "").to_string())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_non_hex() {
        let colors = vec!["#0b3d91".to_string(), " #FFF ".into(), "##".into()];
        assert_eq!(background_param(&colors), "0b3d91,FFF");
    }

    #[test]
    fn one_url_per_seed() {
        let fb = FallbackProvider::new("https://api.dicebear.com/7.x/adventurer/png").unwrap();
        let mut bp = Blueprint::from_seed(100);
        bp.club_colors = vec!["#0b3d91".into(), "#ffffff".into()];

        let urls = fb.urls(&bp, 100, 3);
        assert_eq!(urls.len(), 3);
        for (i, u) in urls.iter().enumerate() {
            let parsed = Url::parse(u).unwrap();
            let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
            assert_eq!(pairs[0], ("seed".into(), (100 + i).to_string()));
            assert_eq!(pairs[1], ("backgroundColor".into(), "0b3d91,ffffff".into()));
            assert_eq!(pairs[2], ("accessoriesProbability".into(), "80".into()));
        }
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(FallbackProvider::new("not a url").is_err());
    }
}
