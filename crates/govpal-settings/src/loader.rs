//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`GovpalSettings::default()`]
//! 2. If `~/.govpal/settings.json` exists, deep-merge user values over defaults
//! 3. Apply `GOVPAL_*` environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::GovpalSettings;

/// Resolve the path to the settings file (`~/.govpal/settings.json`).
#[must_use]
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".govpal").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<GovpalSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<GovpalSettings> {
    let defaults = serde_json::to_value(GovpalSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: GovpalSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    settings.validate();
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
#[must_use]
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `GOVPAL_*` environment variable overrides to loaded settings.
///
/// Invalid values are ignored with a warning — the file/default value
/// stays in effect.
pub fn apply_env_overrides(settings: &mut GovpalSettings) {
    if let Some(v) = read_env_string("GOVPAL_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read_env_u16("GOVPAL_PORT", 1, 65535) {
        settings.server.port = v;
    }
    if let Some(v) = read_env_string("GOVPAL_MANIFEST_URL") {
        settings.manifest.base_url = Some(v);
    }
    if let Some(v) = read_env_usize("GOVPAL_MAX_SESSIONS", 1, 1_000_000) {
        settings.session.max_sessions = v;
    }
    if let Some(v) = read_env_string("GOVPAL_DEFAULT_DEPARTMENT") {
        settings.session.default_department = v;
    }
    if let Some(v) = read_env_string("GOVPAL_DEFAULT_ROLE") {
        settings.session.default_role = v;
    }
    if let Some(v) = read_env_string("GOVPAL_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────

/// Parse a string as a `u16` within a range.
#[must_use]
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `usize` within a range.
#[must_use]
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    let val = std::env::var(name).ok()?;
    let result = parse_u16_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u16 env var, ignoring");
    }
    result
}

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    let val = std::env::var(name).ok()?;
    let result = parse_usize_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid usize env var, ignoring");
    }
    result
}
