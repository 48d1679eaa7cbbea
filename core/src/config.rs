//! Client configuration.
//!
//! Defaults point at the public tasks service. `from_env` overrides them
//! from `TASKBOARD_API_URL`, `TASKBOARD_PAGE_SIZE` and
//! `TASKBOARD_TIMEOUT_SECS`; values that fail to parse keep the default.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.oluwasetemi.dev";
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_size: u64,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup("TASKBOARD_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);
        let page_size = lookup("TASKBOARD_PAGE_SIZE")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.page_size);
        let timeout = lookup("TASKBOARD_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        Self {
            base_url,
            page_size,
            timeout,
        }
    }
}
