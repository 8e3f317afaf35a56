//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown tenant: {0}")]
    UnknownTenant(String),

    #[error("Malformed upstream payload: {0}")]
    MalformedUpstreamPayload(String),

    #[error("Invalid thresholds for tenant {tenant}: short ({short}) must be below medium ({medium})")]
    InvalidThresholds {
        tenant: String,
        short: u32,
        medium: u32,
    },

    #[error("Tenant already registered: {0}")]
    DuplicateTenant(String),
}

impl DomainError {
    /// Check if this error means no tenant (profile or mapper) could be resolved
    pub fn is_unknown_tenant(&self) -> bool {
        matches!(self, DomainError::UnknownTenant(_))
    }

    /// Check if this error came from an unexpected upstream document shape
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, DomainError::MalformedUpstreamPayload(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tenant_display() {
        let error = DomainError::UnknownTenant("east".to_string());
        assert_eq!(error.to_string(), "Unknown tenant: east");
    }

    #[test]
    fn test_invalid_thresholds_display() {
        let error = DomainError::InvalidThresholds {
            tenant: "north".to_string(),
            short: 100,
            medium: 50,
        };
        assert_eq!(
            error.to_string(),
            "Invalid thresholds for tenant north: short (100) must be below medium (50)"
        );
    }

    #[test]
    fn test_kind_checks() {
        assert!(DomainError::UnknownTenant("x".to_string()).is_unknown_tenant());
        assert!(!DomainError::UnknownTenant("x".to_string()).is_malformed_payload());
        assert!(DomainError::MalformedUpstreamPayload("x".to_string()).is_malformed_payload());
        assert!(!DomainError::DuplicateTenant("x".to_string()).is_unknown_tenant());
    }
}
