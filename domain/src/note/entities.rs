//! Canonical note, book and partner user entities

use super::classifier::{ContentLength, classify, word_count};
use crate::tenant::TenantProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// Must stay short for the owning tenant
    Review,
    /// Exempt from the length rule
    Critique,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Review => "review",
            NoteType::Critique => "critique",
        }
    }

    pub fn is_review(&self) -> bool {
        matches!(self, NoteType::Review)
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "review" => Ok(NoteType::Review),
            "critique" => Ok(NoteType::Critique),
            other => Err(format!(
                "Unknown note type: {}. Valid: review, critique",
                other
            )),
        }
    }
}

/// Catalog book as seen after normalization
///
/// Every field is optional: partners omit fields freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
}

impl Book {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        *self == Book::default()
    }
}

/// Author of a partner note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PartnerUser {
    pub fn is_empty(&self) -> bool {
        *self == PartnerUser::default()
    }
}

/// Canonical note
///
/// Produced either by a store (for locally authored notes) or by a
/// response mapper (for partner notes, which may leave any field empty and
/// carry the book and author they refer to).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub note_type: Option<NoteType>,
    pub owner_reference: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub book: Option<Book>,
    pub user: Option<PartnerUser>,
}

impl Note {
    /// Number of whitespace-delimited words in the content
    pub fn word_count(&self) -> usize {
        word_count(self.content.as_deref())
    }

    /// Length class of the content under the given tenant profile
    pub fn content_length(&self, profile: &TenantProfile) -> ContentLength {
        classify(self.word_count(), profile)
    }

    /// Pair the note with its length class under the owner's tenant
    pub fn classified(self, profile: &TenantProfile) -> ClassifiedNote {
        let content_length = self.content_length(profile);
        ClassifiedNote {
            note: self,
            content_length,
        }
    }
}

/// Partner note carrying the length class its tenant assigns it
///
/// Serializes as the note's own fields plus `content_length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedNote {
    #[serde(flatten)]
    pub note: Note,
    pub content_length: ContentLength,
}

/// Unvalidated input for a locally authored note
///
/// `note_type` stays raw text so an unknown type can be told apart from a
/// missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub note_type: Option<String>,
    pub owner_reference: Option<String>,
}

impl NoteDraft {
    pub fn new(owner_reference: impl Into<String>) -> Self {
        Self {
            owner_reference: Some(owner_reference.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_note_type(mut self, note_type: impl Into<String>) -> Self {
        self.note_type = Some(note_type.into());
        self
    }
}

/// A draft that passed [`NoteValidator`](super::validation::NoteValidator)
///
/// Only constructed by the validator, so holding one proves every rule held
/// for the owner's tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedNote {
    title: String,
    content: String,
    note_type: NoteType,
    owner_reference: String,
    content_length: ContentLength,
}

impl ValidatedNote {
    pub(crate) fn new(
        title: String,
        content: String,
        note_type: NoteType,
        owner_reference: String,
        content_length: ContentLength,
    ) -> Self {
        Self {
            title,
            content,
            note_type,
            owner_reference,
            content_length,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn note_type(&self) -> NoteType {
        self.note_type
    }

    pub fn owner_reference(&self) -> &str {
        &self.owner_reference
    }

    pub fn content_length(&self) -> ContentLength {
        self.content_length
    }

    /// Turn into a stored note with the id and timestamp assigned by a store
    pub fn into_note(self, id: impl Into<String>, created_at: DateTime<Utc>) -> Note {
        Note {
            id: Some(id.into()),
            title: Some(self.title),
            content: Some(self.content),
            note_type: Some(self.note_type),
            owner_reference: Some(self.owner_reference),
            created_at: Some(created_at),
            book: None,
            user: None,
        }
    }
}
