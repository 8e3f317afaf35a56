//! Infrastructure layer for notehub
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod store;
pub mod tenants;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileTenantConfig, FileWorkerConfig,
};
pub use http::{HttpUpstreamClient, UpstreamEndpoint};
pub use store::InMemoryNoteStore;
pub use tenants::ConfigTenantDirectory;
