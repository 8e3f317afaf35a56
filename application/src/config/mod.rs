//! Application-level configuration.
//!
//! - [`WorkerConfig`]: upstream timeout and concurrency of partner retrievals

pub mod worker_config;

pub use worker_config::WorkerConfig;
