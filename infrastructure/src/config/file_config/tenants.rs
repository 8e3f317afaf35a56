//! Tenant configuration from TOML (`[tenants.<name>]` sections)
//!
//! Each tenant names the schema family its partner speaks, its content
//! length thresholds and where its partner service lives.
//!
//! ```toml
//! [tenants.north]
//! family = "north"
//! short_threshold = 50
//! medium_threshold = 100
//! base_url = "https://north.example.com/api"
//! notes_path = "/notas"
//! books_path = "/libros"
//! ```
//!
//! Omitted paths follow the family: `/notas` and `/libros` for north,
//! `/Notas` and `/Libros` for south.

use crate::http::UpstreamEndpoint;
use notehub_domain::{DomainError, TenantFamily, TenantProfile};
use serde::{Deserialize, Serialize};

/// Raw tenant configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTenantConfig {
    /// Schema family: "north" or "south"
    pub family: String,
    /// Highest word count still classified as short
    pub short_threshold: u32,
    /// Highest word count still classified as medium
    pub medium_threshold: u32,
    /// Partner service root; tenants without one cannot be fetched from
    pub base_url: Option<String>,
    /// Overrides the family's notes path
    pub notes_path: Option<String>,
    /// Overrides the family's books path
    pub books_path: Option<String>,
}

/// `(notes, books)` paths a family's partners serve by default
fn family_paths(family: Option<TenantFamily>) -> (&'static str, &'static str) {
    match family {
        Some(TenantFamily::North) => ("/notas", "/libros"),
        Some(TenantFamily::South) => ("/Notas", "/Libros"),
        None => ("/notes", "/books"),
    }
}

impl FileTenantConfig {
    /// Built-in "north" tenant
    pub fn north() -> Self {
        let profile = TenantProfile::north();
        Self {
            family: TenantFamily::North.to_string(),
            short_threshold: profile.short_threshold(),
            medium_threshold: profile.medium_threshold(),
            base_url: None,
            notes_path: None,
            books_path: None,
        }
    }

    /// Built-in "south" tenant
    pub fn south() -> Self {
        let profile = TenantProfile::south();
        Self {
            family: TenantFamily::South.to_string(),
            short_threshold: profile.short_threshold(),
            medium_threshold: profile.medium_threshold(),
            base_url: None,
            notes_path: None,
            books_path: None,
        }
    }

    /// Parse the family string
    pub fn parse_family(&self) -> Result<TenantFamily, String> {
        self.family.parse()
    }

    pub fn notes_path(&self) -> &str {
        self.notes_path
            .as_deref()
            .unwrap_or(family_paths(self.parse_family().ok()).0)
    }

    pub fn books_path(&self) -> &str {
        self.books_path
            .as_deref()
            .unwrap_or(family_paths(self.parse_family().ok()).1)
    }

    pub fn to_profile(&self, name: &str) -> Result<TenantProfile, DomainError> {
        TenantProfile::new(name, self.short_threshold, self.medium_threshold)
    }

    /// `None` when no `base_url` is configured
    pub fn to_endpoint(&self) -> Option<UpstreamEndpoint> {
        let base_url = self.base_url.as_deref().map(str::trim)?;
        if base_url.is_empty() {
            return None;
        }
        Some(UpstreamEndpoint::new(
            base_url,
            self.notes_path(),
            self.books_path(),
        ))
    }
}
