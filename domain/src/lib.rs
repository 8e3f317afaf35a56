//! Domain layer for notehub
//!
//! This crate contains the normalization and classification core. It has no
//! dependencies on infrastructure or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Tenants
//!
//! A tenant (utility) is an external partner system. It is described by data:
//! a [`TenantProfile`] with its content length thresholds and a
//! [`TenantFamily`] naming the wire schema it speaks.
//!
//! ## Classification
//!
//! - **word count**: maximal runs of non-whitespace characters
//! - **content length**: short / medium / long against the tenant's thresholds
//! - **validation**: a review must be short for its owner's tenant
//!
//! ## Mapping
//!
//! One [`ResponseMapper`] per schema family converts partner JSON into the
//! canonical [`Note`], [`Book`] and [`PartnerUser`] shapes.

pub mod core;
pub mod mapping;
pub mod note;
pub mod tenant;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use mapping::{
    MapperRegistry, NameParts, NorthResponseMapper, ResponseMapper, SouthResponseMapper,
    split_full_name,
};
pub use note::{
    Book, ClassifiedNote, ContentLength, InvalidReason, Note, NoteDraft, NoteField, NoteType,
    NoteValidator, PartnerUser, ValidatedNote, ValidationFailure, classify, word_count,
};
pub use tenant::{ContentThresholds, TenantFamily, TenantProfile, TenantRegistry};
