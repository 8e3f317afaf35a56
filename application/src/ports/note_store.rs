//! Note store port
//!
//! Persistence of locally authored notes. The store assigns the note id and
//! creation timestamp.

use async_trait::async_trait;
use notehub_domain::{Note, ValidatedNote};
use thiserror::Error;

/// Errors that can occur while persisting a note
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store rejected note: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a validated note and return it as stored
    async fn insert(&self, note: ValidatedNote) -> Result<Note, StoreError>;
}
