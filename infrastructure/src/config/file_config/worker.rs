//! Retrieval worker configuration from TOML (`[worker]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [worker]
//! timeout_seconds = 10
//! max_concurrent = 8
//! ```

use notehub_application::WorkerConfig;
use notehub_application::config::worker_config::{DEFAULT_MAX_CONCURRENT, DEFAULT_UPSTREAM_TIMEOUT};
use serde::{Deserialize, Serialize};

/// Raw worker configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkerConfig {
    /// Upper bound for one partner call, in seconds
    pub timeout_seconds: Option<u64>,
    /// Retrieval slots shared by all tenants
    pub max_concurrent: usize,
}

impl Default for FileWorkerConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: Some(DEFAULT_UPSTREAM_TIMEOUT.as_secs()),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl FileWorkerConfig {
    pub fn to_worker_config(&self) -> WorkerConfig {
        WorkerConfig::from_timeout_seconds(self.timeout_seconds)
            .with_max_concurrent(self.max_concurrent)
    }
}
