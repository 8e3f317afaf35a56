//! JSON output formatter
//!
//! Retrieval results are printed as the `(status, payload)` pair the worker
//! hands to its callers.

use super::formatter::OutputFormatter;
use super::report::{ClassificationReport, TenantSummary};
use notehub_application::{CreateNoteError, RetrievalOutcome};
use notehub_domain::Note;
use serde_json::{Value, json};

pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_outcome(&self, owner_reference: &str, outcome: &RetrievalOutcome) -> String {
        let (status, payload) = outcome.to_status_payload();
        Self::render(&json!({
            "owner_reference": owner_reference,
            "status": status,
            "success": outcome.is_success(),
            "payload": payload,
        }))
    }

    fn format_classification(&self, report: &ClassificationReport) -> String {
        Self::render(&json!(report))
    }

    fn format_created(&self, result: &Result<Note, CreateNoteError>) -> String {
        let value = match result {
            Ok(note) => json!({ "stored": true, "note": note }),
            Err(CreateNoteError::Invalid(failure)) => {
                json!({ "stored": false, "reasons": failure.reasons })
            }
            Err(e) => json!({ "stored": false, "error": e.to_string() }),
        };
        Self::render(&value)
    }

    fn format_tenants(&self, tenants: &[TenantSummary]) -> String {
        Self::render(&json!(tenants))
    }
}
