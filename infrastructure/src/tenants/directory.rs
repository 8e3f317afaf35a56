//! Owner -> tenant resolution from the `[tenants]` and `[owners]` sections

use crate::config::{ConfigValidationError, FileConfig};
use async_trait::async_trait;
use notehub_application::{ResolvedTenant, TenantDirectory};
use notehub_domain::{TenantFamily, TenantRegistry};
use std::collections::BTreeMap;
use tracing::debug;

/// Resolves owners through the configured owner map
///
/// An owner reference that is itself a tenant name resolves to that tenant.
#[derive(Debug, Clone)]
pub struct ConfigTenantDirectory {
    registry: TenantRegistry,
    families: BTreeMap<String, TenantFamily>,
    owners: BTreeMap<String, String>,
}

impl ConfigTenantDirectory {
    pub fn new(
        registry: TenantRegistry,
        families: BTreeMap<String, TenantFamily>,
        owners: BTreeMap<String, String>,
    ) -> Self {
        Self {
            registry,
            families,
            owners,
        }
    }

    /// Build from a loaded configuration; fails on the first validation issue
    pub fn from_config(config: &FileConfig) -> Result<Self, ConfigValidationError> {
        if let Some(issue) = config.validate().into_iter().next() {
            return Err(issue);
        }
        Ok(Self::new(
            config.tenant_registry()?,
            config.tenant_families(),
            config.owners.clone(),
        ))
    }

    pub fn registry(&self) -> &TenantRegistry {
        &self.registry
    }

    pub fn family_of(&self, tenant: &str) -> Option<TenantFamily> {
        self.families.get(tenant).copied()
    }

    /// Tenant name an owner belongs to, without checking the tenant exists
    pub fn tenant_name_for<'a>(&'a self, owner_reference: &'a str) -> &'a str {
        self.owners
            .get(owner_reference)
            .map(String::as_str)
            .unwrap_or(owner_reference)
    }

    pub fn lookup(&self, owner_reference: &str) -> Option<ResolvedTenant> {
        let tenant = self.tenant_name_for(owner_reference);
        let profile = self.registry.profile(tenant).ok()?;
        let family = self.family_of(tenant)?;
        Some(ResolvedTenant::new(profile.clone(), family))
    }
}

#[async_trait]
impl TenantDirectory for ConfigTenantDirectory {
    async fn resolve(&self, owner_reference: &str) -> Option<ResolvedTenant> {
        let resolved = self.lookup(owner_reference);
        if resolved.is_none() {
            debug!("No tenant configured for owner {}", owner_reference);
        }
        resolved
    }
}
