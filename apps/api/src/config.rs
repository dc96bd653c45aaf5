use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::spellcheck::models::{ForeignWorkerCategory, ResumeCategory};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// External spell-check endpoint. Unset disables the general check.
    pub spellcheck_api_url: Option<String>,
    pub spellcheck_timeout: Duration,
    pub max_text_chars: usize,
    /// Fail the whole foreign-worker check when the general check fails.
    pub strict_general_check: bool,
    /// Per-category penalty overrides, e.g. `honorific=12,tabooWords=6`.
    pub resume_penalty_overrides: Vec<(ResumeCategory, u32)>,
    /// Same format, keyed by detector category (`pronunciation=4,spacing=2`).
    pub detector_penalty_overrides: Vec<(ForeignWorkerCategory, u32)>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            spellcheck_api_url: optional_env("SPELLCHECK_API_URL"),
            spellcheck_timeout: Duration::from_secs(parse_env("SPELLCHECK_TIMEOUT_SECS", 5)?),
            max_text_chars: parse_env("MAX_TEXT_CHARS", 10_000)?,
            strict_general_check: parse_env("STRICT_GENERAL_CHECK", false)?,
            resume_penalty_overrides: parse_overrides("RESUME_PENALTY_WEIGHTS")?,
            detector_penalty_overrides: parse_overrides("DETECTOR_PENALTY_WEIGHTS")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

/// Parses `category=penalty` pairs separated by commas.
fn parse_overrides<C: DeserializeOwned>(key: &str) -> Result<Vec<(C, u32)>> {
    let Some(raw) = optional_env(key) else {
        return Ok(vec![]);
    };
    parse_override_list(&raw).with_context(|| format!("{key} has an invalid value '{raw}'"))
}

fn parse_override_list<C: DeserializeOwned>(raw: &str) -> Result<Vec<(C, u32)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, penalty) = pair
                .split_once('=')
                .with_context(|| format!("expected category=penalty, got '{pair}'"))?;
            let category = serde_json::from_value(serde_json::Value::String(name.trim().into()))
                .with_context(|| format!("unknown category '{}'", name.trim()))?;
            let penalty = penalty
                .trim()
                .parse::<u32>()
                .with_context(|| format!("penalty for '{}' must be a whole number", name.trim()))?;
            Ok((category, penalty))
        })
        .collect()
}
