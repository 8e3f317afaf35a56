//! Configuration file loading for notehub
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `NOTEHUB_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./notehub.toml` or `./.notehub.toml`
//! 4. Global: `$XDG_CONFIG_HOME/notehub/config.toml`
//! 5. Default values (the built-in `north` and `south` tenants)

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileTenantConfig, FileWorkerConfig};
pub use loader::ConfigLoader;
