//! Output formatter trait

use super::report::{ClassificationReport, TenantSummary};
use notehub_application::{CreateNoteError, RetrievalOutcome};
use notehub_domain::Note;

/// Trait for formatting command results
pub trait OutputFormatter {
    /// Format the result of a retrieval
    fn format_outcome(&self, owner_reference: &str, outcome: &RetrievalOutcome) -> String;

    fn format_classification(&self, report: &ClassificationReport) -> String;

    /// Format the result of the note creation flow
    fn format_created(&self, result: &Result<Note, CreateNoteError>) -> String;

    fn format_tenants(&self, tenants: &[TenantSummary]) -> String;
}
