use crate::models::issue::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of a free-form detail key. Anything that is not a number is kept as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Number(f64),
    Text(String),
}

impl ExtraValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ExtraValue::Number(n) => Some(*n),
            ExtraValue::Text(_) => None,
        }
    }

    /// Falsy values (zero, empty text) count as "not reported" for display.
    pub fn is_reported(&self) -> bool {
        match self {
            ExtraValue::Number(n) => *n != 0.0 && !n.is_nan(),
            ExtraValue::Text(s) => !s.is_empty(),
        }
    }
}

impl std::fmt::Display for ExtraValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtraValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            ExtraValue::Number(n) => write!(f, "{n}"),
            ExtraValue::Text(s) => f.write_str(s),
        }
    }
}

/// Typed view over an issue's `details` blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub url: String,
    pub issue_code: String,
    pub issue_name: String,
    pub severity: Severity,
    pub category: String,
    pub hint: Option<String>,
    /// Every key outside the required set and `hint`.
    pub extensions: BTreeMap<String, ExtraValue>,
    /// Set when the blob was unusable and the record was synthesized from the
    /// issue's own identity.
    pub degraded: bool,
}

impl DetailRecord {
    pub fn status_code(&self) -> Option<u16> {
        self.extensions
            .get("status_code")
            .and_then(ExtraValue::as_f64)
            .filter(|code| code.fract() == 0.0 && (100.0..=599.0).contains(code))
            .map(|code| code as u16)
    }
}

/// A known performance metric ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetric {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub formatted: String,
}
