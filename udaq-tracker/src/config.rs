//! Tracker configuration
//!
//! The service origin and the poll interval are the only settings. They are
//! passed into the orchestrator and poller at construction; nothing is global.

use std::time::Duration;

/// Default service origin
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default delay between the end of one poll and the start of the next
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Tracker configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Service origin (e.g., "http://localhost:8000"), without the `/api` suffix
    pub base_url: String,

    /// How long to wait after a poll completes before issuing the next one
    pub poll_interval: Duration,
}

impl TrackerConfig {
    /// Creates a new configuration with the default poll interval
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised environment variables:
    /// - UDAQ_BASE_URL (optional, default: http://localhost:8000)
    /// - UDAQ_POLL_INTERVAL_MS (optional, milliseconds, default: 2000)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base_url = var("UDAQ_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let poll_interval = match var("UDAQ_POLL_INTERVAL_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| anyhow::anyhow!("UDAQ_POLL_INTERVAL_MS is not a number: {}", e))?,
            None => DEFAULT_POLL_INTERVAL,
        };

        let config = Self {
            base_url,
            poll_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TrackerConfig::default();

        config.base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://quality.example.com".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_vars() {
        let config = TrackerConfig::from_vars(vars(&[
            ("UDAQ_BASE_URL", "http://analysis:9000"),
            ("UDAQ_POLL_INTERVAL_MS", "500"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://analysis:9000");
        assert_eq!(config.poll_interval, Duration::from_millis(500));

        let config = TrackerConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_from_vars_rejects_bad_values() {
        assert!(TrackerConfig::from_vars(vars(&[("UDAQ_POLL_INTERVAL_MS", "soon")])).is_err());
        assert!(TrackerConfig::from_vars(vars(&[("UDAQ_POLL_INTERVAL_MS", "0")])).is_err());
        assert!(TrackerConfig::from_vars(vars(&[("UDAQ_BASE_URL", "ftp://x")])).is_err());
    }
}
