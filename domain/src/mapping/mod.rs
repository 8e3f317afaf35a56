//! Partner response mapping
//!
//! Each partner family publishes its own JSON schema. A [`ResponseMapper`]
//! turns one upstream document into canonical [`Book`]s and [`Note`]s, and
//! the [`MapperRegistry`] picks the mapper for a tenant's [`TenantFamily`].
//!
//! Mapping is pure and total over well-formed input: every upstream record
//! yields exactly one canonical record, with missing fields left empty. Only
//! a document whose record list is missing or not a list fails, with
//! [`DomainError::MalformedUpstreamPayload`].

pub mod fields;
pub mod name;
pub mod north;
pub mod south;

use crate::core::error::DomainError;
use crate::note::{Book, Note};
use crate::tenant::TenantFamily;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub use name::{NameParts, split_full_name};
pub use north::NorthResponseMapper;
pub use south::SouthResponseMapper;

/// Adapter from one upstream schema family to the canonical shapes
pub trait ResponseMapper: Send + Sync {
    /// Family whose schema this mapper understands
    fn family(&self) -> TenantFamily;

    /// Map the book list of an upstream document, preserving order
    fn map_books(&self, document: &Value) -> Result<Vec<Book>, DomainError>;

    /// Map the note list of an upstream document, preserving order
    fn map_notes(&self, document: &Value) -> Result<Vec<Note>, DomainError>;
}

/// Family -> mapper lookup
///
/// New families are supported by registering another mapper; mappers hold no
/// state, so one instance serves every tenant of its family.
#[derive(Clone, Default)]
pub struct MapperRegistry {
    mappers: HashMap<TenantFamily, Arc<dyn ResponseMapper>>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the north and south mappers
    pub fn with_defaults() -> Self {
        Self::new()
            .with_mapper(Arc::new(NorthResponseMapper))
            .with_mapper(Arc::new(SouthResponseMapper))
    }

    /// Register a mapper under its own family, replacing any previous one
    pub fn register(&mut self, mapper: Arc<dyn ResponseMapper>) {
        self.mappers.insert(mapper.family(), mapper);
    }

    pub fn with_mapper(mut self, mapper: Arc<dyn ResponseMapper>) -> Self {
        self.register(mapper);
        self
    }

    /// Mapper for a family; an unregistered family leaves the tenant unresolvable
    pub fn get(&self, family: TenantFamily) -> Result<Arc<dyn ResponseMapper>, DomainError> {
        self.mappers
            .get(&family)
            .cloned()
            .ok_or_else(|| DomainError::UnknownTenant(format!("no mapper for family {}", family)))
    }

    pub fn families(&self) -> Vec<TenantFamily> {
        let mut families: Vec<_> = self.mappers.keys().copied().collect();
        families.sort_by_key(|f| f.as_str());
        families
    }
}

impl std::fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperRegistry")
            .field("families", &self.families())
            .finish()
    }
}
