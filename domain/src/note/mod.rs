//! Notes (reviews and critiques) and the rules applied to them.
//!
//! - [`entities`]: canonical `Note`, `Book`, `PartnerUser` and local drafts
//! - [`classifier`]: word counting and short/medium/long classification
//! - [`validation`]: rules a locally authored note must satisfy

pub mod classifier;
pub mod entities;
pub mod validation;

pub use classifier::{ContentLength, classify, word_count};
pub use entities::{Book, ClassifiedNote, Note, NoteDraft, NoteType, PartnerUser, ValidatedNote};
pub use validation::{InvalidReason, NoteField, NoteValidator, ValidationFailure};
