//! Retrieval worker configuration.
//!
//! Controls how the retrieval use cases talk to partner services: how long a
//! single upstream call may take and how many calls may be in flight at once.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upper bound for one upstream call
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of concurrent retrieval slots shared by all tenants
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Retrieval worker parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Maximum time to wait for a partner response; `None` leaves the bound
    /// to the transport.
    pub upstream_timeout: Option<Duration>,
    /// Concurrent retrieval slots used by the dispatcher.
    pub max_concurrent: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            upstream_timeout: Some(DEFAULT_UPSTREAM_TIMEOUT),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl WorkerConfig {
    /// Creates a WorkerConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, the worker applies no timeout of its own.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            upstream_timeout: seconds.map(Duration::from_secs),
            ..Self::default()
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.upstream_timeout = None;
        self
    }

    /// Zero is bumped to one slot so dispatched jobs can always make progress
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }
}
