//! Retrieval progress port
//!
//! Reports the phases a retrieval goes through:
//! `Dispatched -> (UpstreamSuccess | UpstreamFailure) -> Mapped | Reported`.

use serde::Serialize;

/// Phase of one retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalPhase {
    /// The upstream call is about to be issued
    Dispatched,
    /// Partner answered with 2xx
    UpstreamSuccess,
    /// Partner answered with non-2xx, or no answer was obtained
    UpstreamFailure,
    /// The success body was mapped to canonical records
    Mapped,
    /// The failure was handed back to the caller as data
    Reported,
}

impl RetrievalPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalPhase::Dispatched => "dispatched",
            RetrievalPhase::UpstreamSuccess => "upstream_success",
            RetrievalPhase::UpstreamFailure => "upstream_failure",
            RetrievalPhase::Mapped => "mapped",
            RetrievalPhase::Reported => "reported",
        }
    }

    /// Whether no further phase follows
    pub fn is_terminal(&self) -> bool {
        matches!(self, RetrievalPhase::Mapped | RetrievalPhase::Reported)
    }
}

/// Callback for progress updates during a retrieval
pub trait RetrievalProgress: Send + Sync {
    fn on_phase(&self, owner_reference: &str, phase: RetrievalPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RetrievalProgress for NoProgress {
    fn on_phase(&self, _owner_reference: &str, _phase: RetrievalPhase) {}
}
