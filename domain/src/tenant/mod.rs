//! Tenants (partner systems, a.k.a. utilities).
//!
//! A tenant is described by data, not by type:
//!
//! - [`profile::TenantProfile`]: the tenant's content length thresholds
//! - [`family::TenantFamily`]: which upstream schema family the tenant speaks
//! - [`registry::TenantRegistry`]: lookup of profiles by tenant name

pub mod family;
pub mod profile;
pub mod registry;

pub use family::TenantFamily;
pub use profile::{ContentThresholds, TenantProfile};
pub use registry::TenantRegistry;
