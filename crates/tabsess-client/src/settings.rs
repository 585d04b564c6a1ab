//! Client settings with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`ClientSettings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use tabsess_core::{MESSAGE_TOPIC, SIGNOUT_PATH};

use crate::errors::SignOutError;

/// Configuration for the sign-out client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// Origin of the authentication backend.
    pub base_url: String,
    /// Path of the sign-out endpoint, relative to `base_url`.
    pub signout_path: String,
    /// HTTP request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Path of the shared cross-context message key file.
    pub message_file: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            signout_path: SIGNOUT_PATH.to_string(),
            timeout_ms: 30_000,
            message_file: default_message_file().to_string_lossy().into_owned(),
        }
    }
}

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home)
}

/// Resolve the path to the settings file (`~/.tabsess/settings.json`).
pub fn settings_path() -> PathBuf {
    home_dir().join(".tabsess").join("settings.json")
}

/// Default location of the shared message key (`~/.tabsess/nextauth.message`).
pub fn default_message_file() -> PathBuf {
    home_dir().join(".tabsess").join(MESSAGE_TOPIC)
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<ClientSettings, SignOutError> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<ClientSettings, SignOutError> {
    let defaults = serde_json::to_value(ClientSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: ClientSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
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

/// Apply environment variable overrides to loaded settings.
///
/// Invalid values are silently ignored (fall back to file/default).
pub fn apply_env_overrides(settings: &mut ClientSettings) {
    if let Some(v) = read_env_string("TABSESS_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = read_env_string("TABSESS_SIGNOUT_PATH") {
        settings.signout_path = v;
    }
    if let Some(v) = read_env_u64("TABSESS_TIMEOUT_MS", 1000, 600_000) {
        settings.timeout_ms = v;
    }
    if let Some(v) = read_env_string("TABSESS_MESSAGE_FILE") {
        settings.message_file = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `u64` within `[min, max]`.
pub fn parse_u64_in_range(val: &str, min: u64, max: u64) -> Option<u64> {
    val.trim()
        .parse::<u64>()
        .ok()
        .filter(|v| (min..=max).contains(v))
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_u64_in_range(&v, min, max))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
