use crate::models::detail::{DetailRecord, DisplayMetric, ExtraValue};
use crate::models::issue::{Issue, IssueType, Severity};
use crate::models::project::Crawl;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub crawl: Crawl,
    pub total_urls: i64,
    pub total_issues: i64,
    /// Always carries all three severities, zero when absent.
    pub issues_by_severity: BTreeMap<Severity, i64>,
    /// Only categories with at least one issue.
    pub issues_by_category: BTreeMap<String, i64>,
    pub site_health: f64,
    pub health_band: HealthBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueTypeGroup {
    pub code: String,
    pub name: String,
    pub severity: Severity,
    pub category: String,
    pub count: i64,
}

/// An issue together with everything presentation needs to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueView {
    pub issue: Issue,
    /// Full catalog entry: description, why it matters, fix and notes.
    pub issue_type: IssueType,
    pub detail: DetailRecord,
    pub metrics: Vec<DisplayMetric>,
    pub extras: BTreeMap<String, ExtraValue>,
    pub hint: String,
}
