//! Tenant profile value object

use crate::core::error::DomainError;
use serde::Serialize;

/// Word count limits separating short, medium and long content
///
/// A count equal to a threshold belongs to the lower bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentThresholds {
    pub short_threshold: u32,
    pub medium_threshold: u32,
}

/// Classification configuration of one tenant (Value Object)
///
/// Created once when the tenant is onboarded and never mutated afterwards,
/// so a profile can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantProfile {
    name: String,
    thresholds: ContentThresholds,
}

impl TenantProfile {
    /// Create a profile, rejecting `short_threshold >= medium_threshold`
    pub fn new(
        name: impl Into<String>,
        short_threshold: u32,
        medium_threshold: u32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if short_threshold >= medium_threshold {
            return Err(DomainError::InvalidThresholds {
                tenant: name,
                short: short_threshold,
                medium: medium_threshold,
            });
        }
        Ok(Self {
            name,
            thresholds: ContentThresholds {
                short_threshold,
                medium_threshold,
            },
        })
    }

    /// Built-in profile of the "north" partner (short up to 50, medium up to 100)
    pub fn north() -> Self {
        Self {
            name: "north".to_string(),
            thresholds: ContentThresholds {
                short_threshold: 50,
                medium_threshold: 100,
            },
        }
    }

    /// Built-in profile of the "south" partner (short up to 60, medium up to 120)
    pub fn south() -> Self {
        Self {
            name: "south".to_string(),
            thresholds: ContentThresholds {
                short_threshold: 60,
                medium_threshold: 120,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thresholds(&self) -> ContentThresholds {
        self.thresholds
    }

    pub fn short_threshold(&self) -> u32 {
        self.thresholds.short_threshold
    }

    pub fn medium_threshold(&self) -> u32 {
        self.thresholds.medium_threshold
    }
}
