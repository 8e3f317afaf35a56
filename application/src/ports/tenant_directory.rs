//! Tenant directory port
//!
//! Resolves the external identity of a note owner to the tenant it belongs
//! to: its classification profile and the schema family its partner speaks.

use async_trait::async_trait;
use notehub_domain::{TenantFamily, TenantProfile};

/// A tenant as needed by the use cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTenant {
    pub profile: TenantProfile,
    pub family: TenantFamily,
}

impl ResolvedTenant {
    pub fn new(profile: TenantProfile, family: TenantFamily) -> Self {
        Self { profile, family }
    }

    pub fn name(&self) -> &str {
        self.profile.name()
    }
}

/// Port for owner -> tenant resolution
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// `None` when the owner belongs to no known tenant
    async fn resolve(&self, owner_reference: &str) -> Option<ResolvedTenant>;
}
