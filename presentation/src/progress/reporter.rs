//! Progress reporting for retrievals
//!
//! Written to stderr so JSON on stdout stays parseable.

use colored::Colorize;
use notehub_application::{RetrievalPhase, RetrievalProgress};

/// Prints one line per retrieval phase
pub struct SimpleProgress;

impl SimpleProgress {
    fn phase_display_name(phase: RetrievalPhase) -> &'static str {
        match phase {
            RetrievalPhase::Dispatched => "Dispatched",
            RetrievalPhase::UpstreamSuccess => "Partner answered",
            RetrievalPhase::UpstreamFailure => "Partner failed",
            RetrievalPhase::Mapped => "Mapped",
            RetrievalPhase::Reported => "Reported",
        }
    }

    pub fn line(owner_reference: &str, phase: RetrievalPhase) -> String {
        let name = Self::phase_display_name(phase);
        let marker = match phase {
            RetrievalPhase::UpstreamFailure => "x".red(),
            RetrievalPhase::UpstreamSuccess | RetrievalPhase::Mapped => "v".green(),
            _ => "->".cyan(),
        };
        format!("{} {} ({})", marker, name.bold(), owner_reference)
    }
}

impl RetrievalProgress for SimpleProgress {
    fn on_phase(&self, owner_reference: &str, phase: RetrievalPhase) {
        eprintln!("{}", Self::line(owner_reference, phase));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line() {
        colored::control::set_override(false);
        assert_eq!(
            SimpleProgress::line("user-1", RetrievalPhase::UpstreamFailure),
            "x Partner failed (user-1)"
        );
        assert_eq!(
            SimpleProgress::line("user-1", RetrievalPhase::Dispatched),
            "-> Dispatched (user-1)"
        );
    }
}
