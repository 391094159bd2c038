//! Tracker configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::Path;

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Environment variable consulted when the config file carries no `Key`.
pub const KEY_ENV_VAR: &str = "JIRALOG_KEY";

fn default_utc_offset() -> String {
    "+05:30".into()
}

/// Tracker configuration parsed from `config.toml`.
///
/// Keys keep the `PascalCase` spelling used by existing config files:
///
/// ```toml
/// Username = "someone@example.com"
/// Key = "api-token"
/// Baseurl = "https://example.atlassian.net/rest/api/2"
/// Prefix = "BLAH"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TrackerConfig {
    /// Basic-auth identity.
    pub username: String,
    /// Basic-auth secret or API token.
    #[serde(default)]
    pub key: String,
    /// Tracker REST API root, without a trailing slash once validated.
    pub baseurl: String,
    /// Task marker; `BLAH` matches `#BLAH-123` in the log.
    pub prefix: String,
    /// Fixed UTC offset applied to worklog start times.
    #[serde(default = "default_utc_offset")]
    pub utcoffset: String,
}

impl TrackerConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Worklog collection URL for a single task.
    #[must_use]
    pub fn worklog_url(&self, task: &str) -> String {
        format!("{}/issue/{task}/worklog", self.baseurl)
    }

    /// Zone used to stamp uploaded worklogs.
    ///
    /// Falls back to UTC when `Utcoffset` cannot be parsed.
    #[must_use]
    pub fn zone(&self) -> FixedOffset {
        parse_utc_offset(&self.utcoffset).unwrap_or_else(|| {
            warn!(utcoffset = %self.utcoffset, "unrecognised utc offset, using UTC");
            Utc.fix()
        })
    }

    fn validate(&mut self) -> Result<()> {
        let trimmed = self.baseurl.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(AppError::Config("Baseurl must not be empty".into()));
        }
        self.baseurl = trimmed.to_owned();

        if self.prefix.trim().is_empty() {
            return Err(AppError::Config("Prefix must not be empty".into()));
        }

        if self.key.is_empty() {
            self.key = env::var(KEY_ENV_VAR).map_err(|_| {
                AppError::Config(format!(
                    "credential Key not found in config file or {KEY_ENV_VAR} env var"
                ))
            })?;
        }

        Ok(())
    }
}

/// Parse `+HH:MM`, `-HHMM`, `Z` or `UTC` into a fixed offset.
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
