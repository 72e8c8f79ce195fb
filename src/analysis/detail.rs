use crate::models::detail::{DetailRecord, DisplayMetric, ExtraValue};
use crate::models::issue::{IssueType, Severity};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const REQUIRED_KEYS: [&str; 5] = ["url", "issue_code", "issue_name", "severity", "category"];
pub const HINT_KEY: &str = "hint";

/// (key, label, decimals, unit) for metrics rendered as chips rather than raw extras.
const KNOWN_METRICS: [(&str, &str, usize, &str); 5] = [
    ("lcp_ms", "LCP", 0, " ms"),
    ("cls", "CLS", 3, ""),
    ("tbt_ms", "TBT", 0, " ms"),
    ("performance_score_mobile", "Score mobile", 0, ""),
    ("performance_score_desktop", "Score desktop", 0, ""),
];

/// What an issue row says about itself, used to check its details blob.
#[derive(Debug, Clone, Copy)]
pub struct IssueIdentity<'a> {
    pub issue_id: i64,
    pub url: &'a str,
    pub issue_type: &'a IssueType,
}

/// Parse a details blob into a `DetailRecord`.
///
/// Never fails: malformed JSON, missing required keys or keys that disagree
/// with the issue's own identity are logged and replaced by a minimal record
/// built from `identity`.
pub fn normalize_details(raw: Option<&str>, identity: &IssueIdentity<'_>) -> DetailRecord {
    let raw = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => {
            log::debug!("Issue {} has no details payload", identity.issue_id);
            return synthetic_detail(identity);
        }
    };

    let object = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            log::warn!(
                "Data integrity: details of issue {} are not a JSON object",
                identity.issue_id
            );
            return synthetic_detail(identity);
        }
        Err(e) => {
            log::warn!(
                "Data integrity: details of issue {} are malformed: {e}",
                identity.issue_id
            );
            return synthetic_detail(identity);
        }
    };

    let faults = required_field_faults(&object, identity);
    if !faults.is_empty() {
        log::warn!(
            "Data integrity: details of issue {} disagree with the stored issue: {}",
            identity.issue_id,
            faults.join("; ")
        );
        return synthetic_detail(identity);
    }

    let hint = object
        .get(HINT_KEY)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|hint| !hint.is_empty())
        .map(str::to_string);

    DetailRecord {
        url: identity.url.to_string(),
        issue_code: identity.issue_type.code.clone(),
        issue_name: identity.issue_type.name.clone(),
        severity: identity.issue_type.severity,
        category: identity.issue_type.category.clone(),
        hint,
        extensions: collect_extensions(&object),
        degraded: false,
    }
}

fn required_field_faults(object: &Map<String, Value>, identity: &IssueIdentity<'_>) -> Vec<String> {
    let issue_type = identity.issue_type;
    let expected = [
        ("url", identity.url),
        ("issue_code", issue_type.code.as_str()),
        ("issue_name", issue_type.name.as_str()),
        ("category", issue_type.category.as_str()),
    ];

    let mut faults = Vec::new();
    for (key, want) in expected {
        // Wrong primitive type reads as absent.
        match object.get(key).and_then(Value::as_str) {
            None => faults.push(format!("{key} missing")),
            Some(got) if got != want => faults.push(format!("{key} is '{got}', expected '{want}'")),
            Some(_) => {}
        }
    }

    match object
        .get("severity")
        .and_then(Value::as_str)
        .map(str::parse::<Severity>)
    {
        None | Some(Err(_)) => faults.push("severity missing".to_string()),
        Some(Ok(severity)) if severity != issue_type.severity => faults.push(format!(
            "severity is '{severity}', expected '{}'",
            issue_type.severity
        )),
        Some(Ok(_)) => {}
    }

    faults
}

fn collect_extensions(object: &Map<String, Value>) -> BTreeMap<String, ExtraValue> {
    object
        .iter()
        .filter(|(key, _)| !REQUIRED_KEYS.contains(&key.as_str()) && key.as_str() != HINT_KEY)
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::Number(n) => ExtraValue::Number(n.as_f64()?),
                Value::String(s) => ExtraValue::Text(s.clone()),
                Value::Bool(b) => ExtraValue::Text(b.to_string()),
                nested => ExtraValue::Text(nested.to_string()),
            };
            Some((key.clone(), value))
        })
        .collect()
}

/// Minimal record built from the issue's own identity, flagged as degraded.
pub fn synthetic_detail(identity: &IssueIdentity<'_>) -> DetailRecord {
    DetailRecord {
        url: identity.url.to_string(),
        issue_code: identity.issue_type.code.clone(),
        issue_name: identity.issue_type.name.clone(),
        severity: identity.issue_type.severity,
        category: identity.issue_type.category.clone(),
        hint: None,
        extensions: BTreeMap::new(),
        degraded: true,
    }
}

/// Known performance metrics, skipping values that are zero or absent.
pub fn display_metrics(detail: &DetailRecord) -> Vec<DisplayMetric> {
    KNOWN_METRICS
        .iter()
        .filter_map(|(key, label, decimals, unit)| {
            let value = detail.extensions.get(*key)?;
            if !value.is_reported() {
                return None;
            }
            let number = value.as_f64()?;
            Some(DisplayMetric {
                key: key.to_string(),
                label: label.to_string(),
                value: number,
                formatted: format!("{label}: {number:.prec$}{unit}", prec = *decimals),
            })
        })
        .collect()
}

/// Extension entries that are not rendered as a known metric or status code.
pub fn extra_entries(detail: &DetailRecord) -> BTreeMap<String, ExtraValue> {
    detail
        .extensions
        .iter()
        .filter(|(key, _)| {
            key.as_str() != "status_code" && !KNOWN_METRICS.iter().any(|(known, ..)| *known == key.as_str())
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Build the details blob stored for a new detection.
pub fn compose_details(url: &str, issue_type: &IssueType, extra: &Map<String, Value>) -> Value {
    let mut object = Map::new();
    for (key, value) in extra {
        if !REQUIRED_KEYS.contains(&key.as_str()) {
            object.insert(key.clone(), value.clone());
        }
    }
    object.insert("url".to_string(), Value::from(url));
    object.insert("issue_code".to_string(), Value::from(issue_type.code.as_str()));
    object.insert("issue_name".to_string(), Value::from(issue_type.name.as_str()));
    object.insert("severity".to_string(), Value::from(issue_type.severity.as_str()));
    object.insert("category".to_string(), Value::from(issue_type.category.as_str()));
    Value::Object(object)
}
