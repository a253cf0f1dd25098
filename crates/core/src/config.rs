//! Helpers for reading configuration from environment variables.
//!
//! Config structs across the workspace expose a `from_env()` constructor
//! built on these helpers so that defaults and parse errors are reported
//! the same way everywhere.

use std::str::FromStr;

use crate::error::CoreError;

/// Read `key`, falling back to `default` when unset.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read `key` if it is set to a non-blank value.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a required variable. Unset or blank values are a config error.
pub fn env_required(key: &str) -> Result<String, CoreError> {
    env_opt(key).ok_or_else(|| CoreError::Config(format!("{key} must be set")))
}

/// Read and parse `key`, falling back to `default` when unset.
///
/// A value that is set but does not parse is an error rather than a
/// silent fallback.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, CoreError> {
    match env_opt(key) {
        None => Ok(default),
        Some(raw) => parse_value(key, &raw),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, CoreError> {
    raw.parse()
        .map_err(|_| CoreError::Config(format!("{key} has an invalid value: {raw:?}")))
}

/// Split a comma-separated list, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
