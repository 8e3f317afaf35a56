//! Upstream schema families
//!
//! Every partner speaks one of a fixed set of wire schemas. The family tag
//! selects the [`ResponseMapper`](crate::mapping::ResponseMapper) used to
//! normalize its responses.

use serde::{Deserialize, Serialize};

/// Upstream schema family of a tenant
///
/// # Example
///
/// ```
/// use notehub_domain::tenant::TenantFamily;
///
/// let family: TenantFamily = "South".parse().unwrap();
/// assert_eq!(family, TenantFamily::South);
/// assert_eq!(family.to_string(), "south");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantFamily {
    /// Lower-case Spanish keys, nested author and book objects
    North,
    /// Capitalized Spanish keys, flat records with a combined author name
    South,
}

impl TenantFamily {
    /// All known families, in registration order
    pub const ALL: [TenantFamily; 2] = [TenantFamily::North, TenantFamily::South];

    /// Get the string identifier for this family
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantFamily::North => "north",
            TenantFamily::South => "south",
        }
    }
}

impl std::fmt::Display for TenantFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TenantFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" => Ok(TenantFamily::North),
            "south" => Ok(TenantFamily::South),
            other => Err(format!(
                "Unknown tenant family: {}. Valid: north, south",
                other
            )),
        }
    }
}
