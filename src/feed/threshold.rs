//! Adaptive acceptance threshold.
//!
//! threshold = baseline − (ratio − 0.5) × 2 × span × confidence
//!
//! - `ratio`      : helpful / total over signals younger than the decay horizon
//! - `confidence` : min(1, recent_total / saturation), so a single click moves
//!                  the gate less than a sustained pattern
//!
//! With no recent feedback the baseline applies. Output is clamped to
//! `[min, max]`.

use serde::{Deserialize, Serialize};

use crate::feed::scoring::DECAY_HORIZON;
use crate::signals::FeedbackSignal;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub baseline: f64,
    pub min: f64,
    pub max: f64,
    /// Maximum distance from baseline at full confidence.
    pub span: f64,
    /// Number of recent signals at which confidence saturates.
    pub saturation: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            baseline: 55.0,
            min: 20.0,
            max: 90.0,
            span: 25.0,
            saturation: 10,
        }
    }
}

impl ThresholdConfig {
    /// Keep bounds inside [0, 100], ordered, and the baseline between them.
    /// Non-finite values fall back to their defaults.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        for (v, fallback) in [
            (&mut self.baseline, d.baseline),
            (&mut self.min, d.min),
            (&mut self.max, d.max),
            (&mut self.span, d.span),
        ] {
            if !v.is_finite() {
                *v = fallback;
            }
        }
        self.min = self.min.clamp(0.0, 100.0);
        self.max = self.max.clamp(0.0, 100.0);
        if self.min > self.max {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        self.baseline = self.baseline.clamp(self.min, self.max);
        self.span = self.span.max(0.0);
        self.saturation = self.saturation.max(1);
        self
    }
}

/// Recomputed on every ranking pass from the full history.
pub fn adaptive_threshold<'a, S>(signals: S, now_ms: i64, cfg: &ThresholdConfig) -> f64
where
    S: IntoIterator<Item = &'a FeedbackSignal>,
{
    let cfg = cfg.sanitized();
    let cutoff = now_ms.saturating_sub(DECAY_HORIZON.as_millis() as i64);

    let (helpful, total) = signals
        .into_iter()
        .filter(|s| s.timestamp > cutoff)
        .fold((0usize, 0usize), |(h, t), s| (h + s.helpful as usize, t + 1));

    if total == 0 {
        return cfg.baseline;
    }

    let ratio = helpful as f64 / total as f64;
    let confidence = (total as f64 / cfg.saturation as f64).min(1.0);
    let raw = cfg.baseline - (ratio - 0.5) * 2.0 * cfg.span * confidence;
    raw.clamp(cfg.min, cfg.max)
}
