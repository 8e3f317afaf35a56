//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversion helpers turn them into the domain and application types the
//! use cases run on.

mod tenants;
mod worker;

pub use tenants::FileTenantConfig;
pub use worker::FileWorkerConfig;

use crate::http::UpstreamEndpoint;
use notehub_application::WorkerConfig;
use notehub_domain::{DomainError, TenantFamily, TenantRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("worker.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("worker.max_concurrent cannot be 0")]
    ZeroConcurrency,

    #[error(
        "tenants.{tenant}: short_threshold ({short}) must be below medium_threshold ({medium})"
    )]
    InvertedThresholds {
        tenant: String,
        short: u32,
        medium: u32,
    },

    #[error("tenants.{tenant}: unknown family '{value}' (expected north or south)")]
    UnknownFamily { tenant: String, value: String },

    #[error("owners.{owner}: tenant '{tenant}' is not configured")]
    UnknownOwnerTenant { owner: String, tenant: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Retrieval worker settings
    pub worker: FileWorkerConfig,
    /// Tenants keyed by name
    pub tenants: BTreeMap<String, FileTenantConfig>,
    /// Owner reference -> tenant name
    pub owners: BTreeMap<String, String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        let mut tenants = BTreeMap::new();
        tenants.insert("north".to_string(), FileTenantConfig::north());
        tenants.insert("south".to_string(), FileTenantConfig::south());
        Self {
            worker: FileWorkerConfig::default(),
            tenants,
            owners: BTreeMap::new(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.worker.timeout_seconds == Some(0) {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if self.worker.max_concurrent == 0 {
            issues.push(ConfigValidationError::ZeroConcurrency);
        }

        for (name, tenant) in &self.tenants {
            if tenant.short_threshold >= tenant.medium_threshold {
                issues.push(ConfigValidationError::InvertedThresholds {
                    tenant: name.clone(),
                    short: tenant.short_threshold,
                    medium: tenant.medium_threshold,
                });
            }
            if tenant.parse_family().is_err() {
                issues.push(ConfigValidationError::UnknownFamily {
                    tenant: name.clone(),
                    value: tenant.family.clone(),
                });
            }
        }

        for (owner, tenant) in &self.owners {
            if !self.tenants.contains_key(tenant) {
                issues.push(ConfigValidationError::UnknownOwnerTenant {
                    owner: owner.clone(),
                    tenant: tenant.clone(),
                });
            }
        }

        issues
    }

    /// Build the tenant registry from the `[tenants]` sections
    pub fn tenant_registry(&self) -> Result<TenantRegistry, DomainError> {
        let mut registry = TenantRegistry::new();
        for (name, tenant) in &self.tenants {
            registry.register(tenant.to_profile(name)?)?;
        }
        Ok(registry)
    }

    /// Schema family per tenant; tenants with an unknown family are skipped
    pub fn tenant_families(&self) -> BTreeMap<String, TenantFamily> {
        self.tenants
            .iter()
            .filter_map(|(name, tenant)| Some((name.clone(), tenant.parse_family().ok()?)))
            .collect()
    }

    /// Endpoints of the tenants that have a `base_url`
    pub fn endpoints(&self) -> BTreeMap<String, UpstreamEndpoint> {
        self.tenants
            .iter()
            .filter_map(|(name, tenant)| Some((name.clone(), tenant.to_endpoint()?)))
            .collect()
    }

    pub fn worker_config(&self) -> WorkerConfig {
        self.worker.to_worker_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[worker]
timeout_seconds = 10
max_concurrent = 8

[tenants.north]
base_url = "https://north.example.com/api"

[tenants.east]
family = "south"
short_threshold = 30
medium_threshold = 90
base_url = "https://east.example.com"
notes_path = "/v2/Notas"

[owners]
"user-17" = "east"
"user-42" = "north"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.worker.timeout_seconds, Some(10));
        assert_eq!(config.worker.max_concurrent, 8);
        assert_eq!(config.tenants.len(), 2);
        assert_eq!(config.owners.get("user-17"), Some(&"east".to_string()));

        let east = &config.tenants["east"];
        assert_eq!(east.notes_path(), "/v2/Notas");
        assert_eq!(east.books_path(), "/Libros");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[worker]
max_concurrent = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.worker.max_concurrent, 2);
        // Defaults should apply
        assert_eq!(config.worker.timeout_seconds, Some(30));
        assert!(config.tenants.contains_key("north"));
        assert!(config.tenants.contains_key("south"));
        assert!(config.owners.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.tenants.len(), 2);
        assert!(config.endpoints().is_empty());

        let registry = config.tenant_registry().unwrap();
        assert_eq!(registry.thresholds_for("north").unwrap().short_threshold, 50);
        assert_eq!(registry.thresholds_for("south").unwrap().medium_threshold, 120);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.worker.timeout_seconds = Some(0);
        config.worker.max_concurrent = 0;
        config.tenants.insert(
            "west".to_string(),
            FileTenantConfig {
                family: "west".to_string(),
                short_threshold: 80,
                medium_threshold: 80,
                ..FileTenantConfig::default()
            },
        );
        config
            .owners
            .insert("user-1".to_string(), "nowhere".to_string());

        let issues = config.validate();
        assert_eq!(issues.len(), 5);
        assert!(issues.contains(&ConfigValidationError::InvalidTimeout));
        assert!(issues.contains(&ConfigValidationError::ZeroConcurrency));
        assert!(issues.contains(&ConfigValidationError::InvertedThresholds {
            tenant: "west".to_string(),
            short: 80,
            medium: 80,
        }));
        assert!(issues.contains(&ConfigValidationError::UnknownFamily {
            tenant: "west".to_string(),
            value: "west".to_string(),
        }));
        assert!(issues.contains(&ConfigValidationError::UnknownOwnerTenant {
            owner: "user-1".to_string(),
            tenant: "nowhere".to_string(),
        }));
    }

    #[test]
    fn test_conversions() {
        let toml_str = r#"
[worker]
timeout_seconds = 3

[tenants.south]
base_url = "http://localhost:8081"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();

        // A partial [tenants.south] table replaces the built-in entry when parsed
        // directly; the figment loader merges it over the defaults instead.
        assert!(config.tenant_registry().is_err());

        let endpoints = config.endpoints();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints["south"].base_url(), "http://localhost:8081");

        assert_eq!(
            config.worker_config().upstream_timeout,
            Some(Duration::from_secs(3))
        );
        assert!(config.tenant_families().is_empty());
    }
}
