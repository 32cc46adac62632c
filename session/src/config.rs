//! Remote API configuration.
//!
//! Native builds read environment variables at startup; the browser build
//! passes compile-time overrides through [`ApiConfig::from_lookup`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::gateway::LogoutPolicy;

pub const DEFAULT_API_BASE_URL: &str = "https://elwi9xjnlh.execute-api.ap-south-1.amazonaws.com/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

pub const API_BASE_URL_VAR: &str = "VIDSYNC_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "VIDSYNC_REQUEST_TIMEOUT_SECS";
pub const LOGOUT_POLICY_VAR: &str = "VIDSYNC_LOGOUT_POLICY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidBaseUrl { var: &'static str, value: String },
    #[error("unknown {var}: {value} (expected 'keep-local-on-failure' or 'always-clear-local')")]
    InvalidLogoutPolicy { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `https://host/api/v1`.
    pub base_url: String,
    /// Upper bound for any single API request.
    pub request_timeout: Duration,
    pub logout_policy: LogoutPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            logout_policy: LogoutPolicy::default(),
        }
    }
}

impl ApiConfig {
    /// Build from process environment variables.
    ///
    /// Optional:
    /// - `VIDSYNC_API_BASE_URL`: default [`DEFAULT_API_BASE_URL`]
    /// - `VIDSYNC_REQUEST_TIMEOUT_SECS`: default 15
    /// - `VIDSYNC_LOGOUT_POLICY`: `keep-local-on-failure` (default) or `always-clear-local`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-http base URL or an unknown logout policy.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(API_BASE_URL_VAR) {
            Some(raw) => parse_base_url(&raw)?,
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let request_timeout = Duration::from_secs(
            lookup(REQUEST_TIMEOUT_VAR)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );
        let logout_policy = match lookup(LOGOUT_POLICY_VAR) {
            Some(raw) => parse_logout_policy(&raw)?,
            None => LogoutPolicy::default(),
        };
        Ok(Self { base_url, request_timeout, logout_policy })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidBaseUrl { var: API_BASE_URL_VAR, value: raw.to_owned() })
    }
}

fn parse_logout_policy(raw: &str) -> Result<LogoutPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "keep-local-on-failure" => Ok(LogoutPolicy::KeepLocalOnFailure),
        "always-clear-local" => Ok(LogoutPolicy::AlwaysClearLocal),
        _ => Err(ConfigError::InvalidLogoutPolicy { var: LOGOUT_POLICY_VAR, value: raw.to_owned() }),
    }
}
