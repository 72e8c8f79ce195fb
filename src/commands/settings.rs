use crate::analysis::health::HealthWeights;
use crate::error::{AuditError, AuditResult};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_SCHEMA_VERSION: i64 = 1;
const SETTINGS_FILE: &str = "settings.json";

/// Typed projection of `settings.json` consumed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveAuditSettings {
    pub health_weights: HealthWeights,
    pub busy_timeout: Duration,
    pub max_update_retries: u32,
    pub auto_complete_on_implemented: bool,
    pub healthy_threshold: f64,
    pub warning_threshold: f64,
}

impl Default for EffectiveAuditSettings {
    fn default() -> Self {
        effective_from_value(&normalize_settings(json!({})))
    }
}

pub async fn get_settings(data_dir: PathBuf) -> AuditResult<Value> {
    load_settings_from_disk(&data_dir)
}

pub async fn save_settings(data_dir: PathBuf, settings: Value) -> AuditResult<Value> {
    save_settings_to_disk(&data_dir, settings)
}

pub fn load_effective_audit_settings(data_dir: &Path) -> AuditResult<EffectiveAuditSettings> {
    let settings = load_settings_from_disk(data_dir)?;
    Ok(effective_from_value(&settings))
}

fn effective_from_value(settings: &Value) -> EffectiveAuditSettings {
    let defaults = HealthWeights::default();
    let weights = settings.get("healthWeights");
    let weight = |key: &str, fallback: f64| {
        weights
            .and_then(|w| w.get(key))
            .and_then(Value::as_f64)
            .unwrap_or(fallback)
    };
    let health_weights = HealthWeights {
        critical: weight("critical", defaults.critical),
        major: weight("major", defaults.major),
        minor: weight("minor", defaults.minor),
    };

    let read_u64 = |key: &str, fallback: u64| settings.get(key).and_then(Value::as_u64).unwrap_or(fallback);

    EffectiveAuditSettings {
        health_weights: if health_weights.is_valid() {
            health_weights
        } else {
            defaults
        },
        busy_timeout: Duration::from_millis(read_u64("busyTimeoutMs", 5000)),
        max_update_retries: read_u64("maxUpdateRetries", 3) as u32,
        auto_complete_on_implemented: settings
            .get("autoCompleteOnImplemented")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        healthy_threshold: read_u64("healthyThreshold", 85) as f64,
        warning_threshold: read_u64("warningThreshold", 60) as f64,
    }
}

pub fn load_settings_from_disk(data_dir: &Path) -> AuditResult<Value> {
    let path = settings_path(data_dir);
    ensure_data_dir(data_dir)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable {}: {e}", path.display());
            json!({})
        })
    } else {
        json!({})
    };

    let normalized = normalize_settings(original.clone());
    if normalized != original || !path.exists() {
        write_settings_file(&path, &normalized)?;
    }

    Ok(normalized)
}

pub fn save_settings_to_disk(data_dir: &Path, settings: Value) -> AuditResult<Value> {
    if !settings.is_object() {
        return Err(AuditError::Validation(
            "settings must be a JSON object".to_string(),
        ));
    }

    let path = settings_path(data_dir);
    ensure_data_dir(data_dir)?;

    let mut merged = load_settings_from_disk(data_dir).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let normalized = normalize_settings(merged);
    write_settings_file(&path, &normalized)?;
    Ok(normalized)
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

fn ensure_data_dir(data_dir: &Path) -> AuditResult<()> {
    fs::create_dir_all(data_dir).map_err(|e| {
        AuditError::Io(format!(
            "Failed to create data directory {}: {e}",
            data_dir.display()
        ))
    })
}

fn write_settings_file(path: &Path, settings: &Value) -> AuditResult<()> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| AuditError::Io(format!("Failed to serialize settings: {e}")))?;
    fs::write(path, raw)
        .map_err(|e| AuditError::Io(format!("Failed to write {}: {e}", path.display())))
}

fn normalize_settings(input: Value) -> Value {
    let defaults = default_settings();
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    deep_merge_defaults(&mut out, &defaults);
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    let weights = HealthWeights::default();
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "healthWeights": {
            "critical": weights.critical,
            "major": weights.major,
            "minor": weights.minor
        },
        "busyTimeoutMs": 5000,
        "maxUpdateRetries": 3,
        "autoCompleteOnImplemented": false,
        "healthyThreshold": 85,
        "warningThreshold": 60
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

pub(crate) fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_u64(obj, "busyTimeoutMs", 100, 60_000, 5000);
    clamp_u64(obj, "maxUpdateRetries", 1, 10, 3);
    clamp_u64(obj, "healthyThreshold", 50, 100, 85);
    clamp_u64(obj, "warningThreshold", 10, 95, 60);
    ensure_bool(obj, "autoCompleteOnImplemented", false);

    let healthy = obj.get("healthyThreshold").and_then(Value::as_u64).unwrap_or(85);
    let warning = obj.get("warningThreshold").and_then(Value::as_u64).unwrap_or(60);
    if warning >= healthy {
        obj.insert("healthyThreshold".to_string(), json!(85));
        obj.insert("warningThreshold".to_string(), json!(60));
    }

    let defaults = HealthWeights::default();
    let weights = obj
        .entry("healthWeights".to_string())
        .or_insert_with(|| json!({}));

    let read = |w: &Value, key: &str, fallback: f64| {
        w.get(key)
            .and_then(Value::as_f64)
            .unwrap_or(fallback)
            .clamp(0.0, 10.0)
    };
    let current = weights.clone();
    let candidate = HealthWeights {
        critical: read(&current, "critical", defaults.critical),
        major: read(&current, "major", defaults.major),
        minor: read(&current, "minor", defaults.minor),
    };
    let chosen = if candidate.is_valid() {
        candidate
    } else {
        log::warn!("Health weights {candidate:?} are not ordered critical > major > minor > 0, using defaults");
        defaults
    };
    *weights = json!({
        "critical": chosen.critical,
        "major": chosen.major,
        "minor": chosen.minor
    });
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn ensure_bool(map: &mut Map<String, Value>, key: &str, default: bool) {
    let value = map.get(key).and_then(Value::as_bool).unwrap_or(default);
    map.insert(key.to_string(), json!(value));
}
