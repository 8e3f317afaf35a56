//! Create note use case
//!
//! Resolves the owner's tenant, validates the draft against that tenant's
//! profile and persists the result.

use crate::ports::note_store::{NoteStore, StoreError};
use crate::ports::tenant_directory::TenantDirectory;
use notehub_domain::{Note, NoteDraft, NoteValidator, ValidationFailure};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while creating a note
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateNoteError {
    #[error("Unknown tenant for owner {0}")]
    UnknownTenant(String),

    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CreateNoteError {
    pub fn is_invalid(&self) -> bool {
        matches!(self, CreateNoteError::Invalid(_))
    }
}

/// Use case for persisting a locally authored note
pub struct CreateNoteUseCase<D, S>
where
    D: TenantDirectory + 'static,
    S: NoteStore + 'static,
{
    directory: Arc<D>,
    store: Arc<S>,
}

impl<D, S> CreateNoteUseCase<D, S>
where
    D: TenantDirectory + 'static,
    S: NoteStore + 'static,
{
    pub fn new(directory: Arc<D>, store: Arc<S>) -> Self {
        Self { directory, store }
    }

    pub async fn execute(&self, draft: NoteDraft) -> Result<Note, CreateNoteError> {
        // Without an owner there is no tenant, so only the field rules apply
        let owner = match draft.owner_reference.as_deref().map(str::trim) {
            Some(owner) if !owner.is_empty() => owner.to_string(),
            _ => {
                let failure = ValidationFailure {
                    reasons: NoteValidator::field_reasons(&draft),
                };
                warn!("Rejected note without owner: {}", failure);
                return Err(failure.into());
            }
        };

        let tenant = self
            .directory
            .resolve(&owner)
            .await
            .ok_or_else(|| CreateNoteError::UnknownTenant(owner.clone()))?;

        debug!("Validating note for owner {} against tenant {}", owner, tenant.name());

        let validated = NoteValidator::validate(&draft, &tenant.profile).inspect_err(|e| {
            warn!("Rejected note for owner {}: {}", owner, e);
        })?;

        let note = self.store.insert(validated).await?;
        info!(
            "Stored note {} for owner {}",
            note.id.as_deref().unwrap_or("?"),
            owner
        );
        Ok(note)
    }
}
