use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Major, Severity::Minor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "major" => Ok(Severity::Major),
            "minor" => Ok(Severity::Minor),
            _ => Err(format!("Unknown severity: {s}")),
        }
    }
}

/// Catalog entry describing a class of problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueType {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub severity: Severity,
    pub category: String,
    pub description: String,
    pub why_it_matters: String,
    pub fix_hint: String,
    pub technical_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationStatus {
    Pending,
    InProgress,
    Done,
}

impl RemediationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediationStatus::Pending => "pending",
            RemediationStatus::InProgress => "in_progress",
            RemediationStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for RemediationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RemediationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RemediationStatus::Pending),
            "in_progress" => Ok(RemediationStatus::InProgress),
            "done" => Ok(RemediationStatus::Done),
            _ => Err(format!(
                "Unknown status: {s} (expected pending, in_progress or done)"
            )),
        }
    }
}

/// Operator-facing state of an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemediationRecord {
    pub status: RemediationStatus,
    pub implemented: bool,
    pub comment: Option<String>,
    /// Unix milliseconds of the last successful update.
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub id: i64,
    pub crawl_id: i64,
    pub url_id: i64,
    pub issue_type_id: i64,
    pub details: Option<String>,
    #[serde(flatten)]
    pub remediation: RemediationRecord,
    pub created_at: i64,
    /// Bumped by every committed remediation write.
    pub version: i64,
}

/// Merge-patch body for a remediation update. Absent fields keep their value.
///
/// `status` stays a raw string so an unknown value surfaces as a validation
/// error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssuePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl IssuePatch {
    pub fn is_empty(&self) -> bool {
        self.implemented.is_none() && self.status.is_none() && self.comment.is_none()
    }
}
