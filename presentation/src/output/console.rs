//! Console output formatter

use super::formatter::OutputFormatter;
use super::report::{ClassificationReport, TenantSummary};
use colored::Colorize;
use notehub_application::{CreateNoteError, MappedPayload, RetrievalOutcome};
use notehub_domain::{Book, ClassifiedNote, ContentLength, InvalidReason, Note};

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_outcome(owner_reference: &str, outcome: &RetrievalOutcome) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(&format!("Retrieval for {}", owner_reference)));
        output.push('\n');

        match outcome {
            RetrievalOutcome::Mapped { status, payload } => {
                output.push_str(&format!(
                    "{} {} ({} {})\n",
                    "Status:".cyan().bold(),
                    status.to_string().green(),
                    payload.len(),
                    match payload {
                        MappedPayload::Notes(_) => "notes",
                        MappedPayload::Books(_) => "books",
                    }
                ));
                match payload {
                    MappedPayload::Notes(notes) => {
                        for note in notes {
                            output.push_str(&Self::note_line(note));
                        }
                    }
                    MappedPayload::Books(books) => {
                        for book in books {
                            output.push_str(&Self::book_line(book));
                        }
                    }
                }
            }
            RetrievalOutcome::UpstreamError { status, body } => {
                output.push_str(&format!(
                    "{} {} (partner error)\n",
                    "Status:".cyan().bold(),
                    status.to_string().red()
                ));
                output.push_str(&Self::indent(body, "  "));
                output.push('\n');
            }
            RetrievalOutcome::TransportFailure(e) => {
                let (status, _) = outcome.to_status_payload();
                output.push_str(&format!(
                    "{} {} (no answer)\n",
                    "Status:".cyan().bold(),
                    status.to_string().red()
                ));
                output.push_str(&format!("  {}\n", e));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_classification(report: &ClassificationReport) -> String {
        let length = match report.length {
            ContentLength::Short => report.length.as_str().green(),
            ContentLength::Medium => report.length.as_str().yellow(),
            ContentLength::Long => report.length.as_str().red(),
        };
        format!(
            "{} {}\n{} {}\n{} {} (short <= {}, medium <= {})\n",
            "Tenant:".cyan().bold(),
            report.tenant,
            "Words:".cyan().bold(),
            report.word_count,
            "Length:".cyan().bold(),
            length.bold(),
            report.short_threshold,
            report.medium_threshold
        )
    }

    pub fn format_created(result: &Result<Note, CreateNoteError>) -> String {
        match result {
            Ok(note) => format!(
                "{} note {} ({}) for {}\n",
                "Stored".green().bold(),
                note.id.as_deref().unwrap_or("?"),
                note.note_type.map(|t| t.as_str()).unwrap_or("?"),
                note.owner_reference.as_deref().unwrap_or("?")
            ),
            Err(CreateNoteError::Invalid(failure)) => {
                let mut output = format!("{}\n", "Note rejected:".red().bold());
                for reason in &failure.reasons {
                    let tag = match reason {
                        InvalidReason::Missing { .. } => "missing",
                        InvalidReason::UnknownNoteType { .. } => "type",
                        InvalidReason::ReviewTooLong { .. } => "length",
                    };
                    output.push_str(&format!("  {} {}\n", format!("[{}]", tag).yellow(), reason));
                }
                output
            }
            Err(e) => format!("{} {}\n", "Error:".red().bold(), e),
        }
    }

    pub fn format_tenants(tenants: &[TenantSummary]) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Tenants"));

        for tenant in tenants {
            let family = tenant
                .family
                .map(|f| f.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            output.push_str(&format!(
                "\n{} {}\n",
                format!("── {} ──", tenant.name).yellow().bold(),
                format!("({})", family).dimmed()
            ));
            output.push_str(&format!(
                "  short <= {}, medium <= {}, long above\n",
                tenant.short_threshold, tenant.medium_threshold
            ));
            match &tenant.endpoint {
                Some(url) => output.push_str(&format!("  endpoint: {}\n", url)),
                None => output.push_str(&format!("  endpoint: {}\n", "not configured".dimmed())),
            }
            if !tenant.owners.is_empty() {
                output.push_str(&format!("  owners: {}\n", tenant.owners.join(", ")));
            }
        }

        output
    }

    fn note_line(classified: &ClassifiedNote) -> String {
        let note = &classified.note;
        let mut line = format!(
            "  {} {} {} {}",
            format!("#{}", note.id.as_deref().unwrap_or("-")).dimmed(),
            note.title.as_deref().unwrap_or("(untitled)").bold(),
            format!("[{}]", note.note_type.map(|t| t.as_str()).unwrap_or("unknown")).cyan(),
            classified.content_length.as_str().dimmed()
        );
        if let Some(book) = note.book.as_ref().and_then(|b| b.title.as_deref()) {
            line.push_str(&format!(" on {}", book));
        }
        if let Some(email) = note.user.as_ref().and_then(|u| u.email.as_deref()) {
            line.push_str(&format!(" by {}", email));
        }
        line.push('\n');
        line
    }

    fn book_line(book: &Book) -> String {
        let mut line = format!(
            "  {} {}",
            format!("#{}", book.id.as_deref().unwrap_or("-")).dimmed(),
            book.title.as_deref().unwrap_or("(untitled)").bold()
        );
        if let Some(author) = book.author.as_deref() {
            line.push_str(&format!(" - {}", author));
        }
        if let Some(year) = book.year {
            line.push_str(&format!(" ({})", year));
        }
        line.push('\n');
        line
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outcome(&self, owner_reference: &str, outcome: &RetrievalOutcome) -> String {
        Self::format_outcome(owner_reference, outcome)
    }

    fn format_classification(&self, report: &ClassificationReport) -> String {
        Self::format_classification(report)
    }

    fn format_created(&self, result: &Result<Note, CreateNoteError>) -> String {
        Self::format_created(result)
    }

    fn format_tenants(&self, tenants: &[TenantSummary]) -> String {
        Self::format_tenants(tenants)
    }
}
