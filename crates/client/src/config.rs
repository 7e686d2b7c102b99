// Client Configuration
//
// Endpoint and credentials for the event API, loaded from environment
// variables or built directly.

use std::env;
use std::time::Duration;

use crate::error::{Result, SubmissionError};

const EVENTS_PATH: &str = "/v1/events";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::DynatraceClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., https://abc12345.live.dynatrace.com/api)
    pub base_url: String,

    /// API token sent as `Authorization: Api-Token <token>`
    pub api_token: String,

    /// Total request timeout, including connect
    pub timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `DT_API_URL`: API base URL (required)
    /// - `DT_API_TOKEN`: API token (required)
    /// - `DT_TIMEOUT_SECS`: request timeout in seconds, at least 1 (default: 30)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = required_var(&lookup, "DT_API_URL")?;
        let api_token = required_var(&lookup, "DT_API_TOKEN")?;

        let timeout_secs = match lookup("DT_TIMEOUT_SECS") {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(base_url, api_token).with_timeout(Duration::from_secs(timeout_secs)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL of the event ingestion endpoint
    pub fn events_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), EVENTS_PATH)
    }

    /// Value of the Authorization header
    pub fn auth_header(&self) -> String {
        format!("Api-Token {}", self.api_token)
    }

    /// Reject configurations that cannot produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(SubmissionError::config("base URL is empty"));
        }
        if self.api_token.is_empty() {
            return Err(SubmissionError::config("API token is empty"));
        }
        if self.timeout.is_zero() {
            return Err(SubmissionError::config("timeout must be greater than zero"));
        }
        Ok(())
    }
}

fn required_var<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SubmissionError::config(format!(
            "{} environment variable not set",
            name
        ))),
    }
}

fn parse_timeout_secs(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(SubmissionError::config(format!(
            "DT_TIMEOUT_SECS must be a positive number of seconds, got {:?}",
            raw
        ))),
    }
}

fn default_user_agent() -> String {
    format!("dtclient/{}", env!("CARGO_PKG_VERSION"))
}
