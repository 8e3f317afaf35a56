//! Tenant profile registry

use super::profile::{ContentThresholds, TenantProfile};
use crate::core::error::DomainError;
use std::collections::BTreeMap;

/// Read-only lookup of tenant profiles by tenant name
///
/// Profiles are registered while the registry is being built and only read
/// afterwards.
///
/// # Example
///
/// ```
/// use notehub_domain::tenant::TenantRegistry;
///
/// let registry = TenantRegistry::with_defaults();
/// let thresholds = registry.thresholds_for("south").unwrap();
/// assert_eq!(thresholds.short_threshold, 60);
/// assert!(registry.thresholds_for("east").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TenantRegistry {
    profiles: BTreeMap<String, TenantProfile>,
}

impl TenantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in north and south profiles
    pub fn with_defaults() -> Self {
        let mut profiles = BTreeMap::new();
        for profile in [TenantProfile::north(), TenantProfile::south()] {
            profiles.insert(profile.name().to_string(), profile);
        }
        Self { profiles }
    }

    /// Add a profile; names are unique
    pub fn register(&mut self, profile: TenantProfile) -> Result<(), DomainError> {
        if self.profiles.contains_key(profile.name()) {
            return Err(DomainError::DuplicateTenant(profile.name().to_string()));
        }
        self.profiles.insert(profile.name().to_string(), profile);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_profile(mut self, profile: TenantProfile) -> Result<Self, DomainError> {
        self.register(profile)?;
        Ok(self)
    }

    pub fn profile(&self, tenant: &str) -> Result<&TenantProfile, DomainError> {
        self.profiles
            .get(tenant)
            .ok_or_else(|| DomainError::UnknownTenant(tenant.to_string()))
    }

    pub fn thresholds_for(&self, tenant: &str) -> Result<ContentThresholds, DomainError> {
        self.profile(tenant).map(TenantProfile::thresholds)
    }

    pub fn contains(&self, tenant: &str) -> bool {
        self.profiles.contains_key(tenant)
    }

    /// Profiles ordered by tenant name
    pub fn iter(&self) -> impl Iterator<Item = &TenantProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
