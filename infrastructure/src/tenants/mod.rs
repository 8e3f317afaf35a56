//! Tenant resolution backed by configuration

mod directory;

pub use directory::ConfigTenantDirectory;
