use config::constants::DEFAULT_API_URL;
use controller::{DEFAULT_HEALTH_INTERVAL, DEFAULT_STATS_INTERVAL, PollIntervals};
use serde::Deserialize;
use std::time::Duration;

/// A zero timeout would fail every request
pub const MIN_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AppConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 750.0,
        }
    }
}

/// Where the search backend lives and how often its status is polled
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub health_interval_secs: u64,
    pub stats_interval_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: api::DEFAULT_TIMEOUT.as_secs(),
            health_interval_secs: DEFAULT_HEALTH_INTERVAL.as_secs(),
            stats_interval_secs: DEFAULT_STATS_INTERVAL.as_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs).max(MIN_TIMEOUT)
    }

    pub fn poll_intervals(&self) -> PollIntervals {
        PollIntervals {
            health: Duration::from_secs(self.health_interval_secs),
            stats: Duration::from_secs(self.stats_interval_secs),
        }
    }
}
