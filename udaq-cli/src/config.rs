//! Configuration module
//!
//! Starts from the tracker's environment configuration and applies the
//! command-line overrides on top.

use anyhow::{Context, Result};
use std::time::Duration;
use udaq_client::ServiceClient;
use udaq_tracker::TrackerConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub tracker: TrackerConfig,
}

impl Config {
    /// Loads `UDAQ_*` environment settings, then applies the flags
    pub fn from_args(base_url: Option<String>, poll_interval_ms: Option<u64>) -> Result<Self> {
        let env = TrackerConfig::from_env().context("Invalid environment configuration")?;
        Self::with_overrides(env, base_url, poll_interval_ms)
    }

    fn with_overrides(
        mut tracker: TrackerConfig,
        base_url: Option<String>,
        poll_interval_ms: Option<u64>,
    ) -> Result<Self> {
        if let Some(base_url) = base_url {
            tracker.base_url = base_url;
        }
        if let Some(ms) = poll_interval_ms {
            tracker.poll_interval = Duration::from_millis(ms);
        }
        tracker.validate().context("Invalid configuration")?;
        Ok(Self { tracker })
    }

    pub fn client(&self) -> ServiceClient {
        ServiceClient::new(self.tracker.base_url.clone())
    }
}
