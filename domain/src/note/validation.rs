//! Validation of locally authored notes
//!
//! Every rule reports independently, so a single draft can fail on presence,
//! type and length at once. The length rule is tenant specific: a review
//! must classify as [`ContentLength::Short`] under the owner's profile.

use super::classifier::{ContentLength, classify, word_count};
use super::entities::{NoteDraft, NoteType, ValidatedNote};
use crate::core::string::non_blank;
use crate::tenant::TenantProfile;
use serde::Serialize;
use thiserror::Error;

/// Required note fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteField {
    Title,
    Content,
    NoteType,
    OwnerReference,
}

impl NoteField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteField::Title => "title",
            NoteField::Content => "content",
            NoteField::NoteType => "note_type",
            NoteField::OwnerReference => "owner_reference",
        }
    }
}

impl std::fmt::Display for NoteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a draft was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidReason {
    #[error("{field} can't be blank")]
    Missing { field: NoteField },

    #[error("note_type '{value}' is not valid (expected review or critique)")]
    UnknownNoteType { value: String },

    #[error("review is too long: limit is {short_threshold} words, got {word_count}")]
    ReviewTooLong {
        word_count: usize,
        short_threshold: u32,
    },
}

impl InvalidReason {
    pub fn is_presence(&self) -> bool {
        matches!(self, InvalidReason::Missing { .. })
    }

    pub fn is_type(&self) -> bool {
        matches!(self, InvalidReason::UnknownNoteType { .. })
    }

    pub fn is_length(&self) -> bool {
        matches!(self, InvalidReason::ReviewTooLong { .. })
    }
}

/// All reasons a draft failed validation (never empty)
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("invalid note: {}", join_reasons(.reasons))]
pub struct ValidationFailure {
    pub reasons: Vec<InvalidReason>,
}

fn join_reasons(reasons: &[InvalidReason]) -> String {
    reasons
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationFailure {
    /// Threshold carried by the length violation, if any
    pub fn length_limit(&self) -> Option<u32> {
        self.reasons.iter().find_map(|r| match r {
            InvalidReason::ReviewTooLong {
                short_threshold, ..
            } => Some(*short_threshold),
            _ => None,
        })
    }

    pub fn missing_fields(&self) -> Vec<NoteField> {
        self.reasons
            .iter()
            .filter_map(|r| match r {
                InvalidReason::Missing { field } => Some(*field),
                _ => None,
            })
            .collect()
    }
}

/// Fields that passed the presence and type rules
struct CheckedFields<'a> {
    title: Option<&'a str>,
    content: Option<&'a str>,
    note_type: Option<NoteType>,
    owner: Option<&'a str>,
    reasons: Vec<InvalidReason>,
}

/// Applies the note rules for one tenant profile
pub struct NoteValidator;

impl NoteValidator {
    /// Validate a draft against the owner's tenant profile
    pub fn validate(
        draft: &NoteDraft,
        profile: &TenantProfile,
    ) -> Result<ValidatedNote, ValidationFailure> {
        let CheckedFields {
            title,
            content,
            note_type,
            owner,
            mut reasons,
        } = Self::check_fields(draft);

        let words = word_count(content);
        let content_length = classify(words, profile);
        if note_type.is_some_and(|t| t.is_review()) && content_length != ContentLength::Short {
            reasons.push(InvalidReason::ReviewTooLong {
                word_count: words,
                short_threshold: profile.short_threshold(),
            });
        }

        match (title, content, note_type, owner) {
            (Some(title), Some(content), Some(note_type), Some(owner)) if reasons.is_empty() => {
                Ok(ValidatedNote::new(
                    title.to_string(),
                    content.to_string(),
                    note_type,
                    owner.to_string(),
                    content_length,
                ))
            }
            _ => Err(ValidationFailure { reasons }),
        }
    }

    /// Presence and type violations, for drafts with no tenant to apply the
    /// length rule against
    pub fn field_reasons(draft: &NoteDraft) -> Vec<InvalidReason> {
        Self::check_fields(draft).reasons
    }

    fn check_fields(draft: &NoteDraft) -> CheckedFields<'_> {
        let mut reasons = Vec::new();

        let title = non_blank(draft.title.as_deref());
        let content = non_blank(draft.content.as_deref());
        let owner = non_blank(draft.owner_reference.as_deref());

        if title.is_none() {
            reasons.push(InvalidReason::Missing {
                field: NoteField::Title,
            });
        }
        if content.is_none() {
            reasons.push(InvalidReason::Missing {
                field: NoteField::Content,
            });
        }

        let note_type = match non_blank(draft.note_type.as_deref()) {
            None => {
                reasons.push(InvalidReason::Missing {
                    field: NoteField::NoteType,
                });
                None
            }
            Some(raw) => match raw.parse::<NoteType>() {
                Ok(note_type) => Some(note_type),
                Err(_) => {
                    reasons.push(InvalidReason::UnknownNoteType {
                        value: raw.to_string(),
                    });
                    None
                }
            },
        };

        if owner.is_none() {
            reasons.push(InvalidReason::Missing {
                field: NoteField::OwnerReference,
            });
        }

        CheckedFields {
            title,
            content,
            note_type,
            owner,
            reasons,
        }
    }
}
