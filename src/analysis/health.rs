use crate::models::issue::Severity;
use crate::models::summary::HealthBand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-severity deduction, in health points per affected page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthWeights {
    pub critical: f64,
    pub major: f64,
    pub minor: f64,
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            critical: 1.0,
            major: 0.5,
            minor: 0.1,
        }
    }
}

impl HealthWeights {
    pub fn weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::Major => self.major,
            Severity::Minor => self.minor,
        }
    }

    /// Weights must be finite and strictly ordered critical > major > minor > 0,
    /// so every issue costs something and worse issues always cost more.
    pub fn is_valid(&self) -> bool {
        [self.critical, self.major, self.minor]
            .iter()
            .all(|w| w.is_finite())
            && self.critical > self.major
            && self.major > self.minor
            && self.minor > 0.0
    }
}

/// Compute site health (0–100).
///
/// Starts at 100 and deducts `weight(severity) * 100 / total_urls` per issue,
/// so ten critical issues cost a 10-page site as much as a thousand cost a
/// 1000-page site. A crawl with zero pages is scored as if it had one.
pub fn compute_site_health(
    issues_by_severity: &BTreeMap<Severity, i64>,
    total_urls: i64,
    weights: &HealthWeights,
) -> f64 {
    let pages = total_urls.max(1) as f64;
    let deduction: f64 = issues_by_severity
        .iter()
        .map(|(severity, count)| weights.weight(*severity) * (*count).max(0) as f64)
        .sum::<f64>()
        * 100.0
        / pages;

    (100.0 - deduction).clamp(0.0, 100.0)
}

pub fn health_band(score: f64, healthy_threshold: f64, warning_threshold: f64) -> HealthBand {
    if score >= healthy_threshold {
        HealthBand::Healthy
    } else if score >= warning_threshold {
        HealthBand::Warning
    } else {
        HealthBand::Critical
    }
}
