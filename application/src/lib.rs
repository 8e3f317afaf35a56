//! Application layer for notehub
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::WorkerConfig;
pub use ports::{
    note_store::{NoteStore, StoreError},
    progress::{NoProgress, RetrievalPhase, RetrievalProgress},
    tenant_directory::{ResolvedTenant, TenantDirectory},
    upstream_client::{
        QueryParams, TransportError, UpstreamClient, UpstreamResource, UpstreamResponse,
    },
};
pub use use_cases::create_note::{CreateNoteError, CreateNoteUseCase};
pub use use_cases::dispatch::{JobId, RetrievalDispatcher, RetrievalJob};
pub use use_cases::retrieve::{
    MappedPayload, RetrievalError, RetrievalOutcome, RetrievalRequest, RetrievalWorker,
};
