//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod note_store;
pub mod progress;
pub mod tenant_directory;
pub mod upstream_client;
