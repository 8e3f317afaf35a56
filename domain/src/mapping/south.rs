//! "South" family mapper
//!
//! Capitalized Spanish keys on flat records. The note type is a boolean
//! (`ReseniaNota`) and the author arrives as one combined name that goes
//! through [`split_full_name`].

use super::ResponseMapper;
use super::fields::{flag, record_list, text, timestamp, year};
use super::name::split_full_name;
use crate::core::error::DomainError;
use crate::note::{Book, Note, NoteType, PartnerUser};
use crate::tenant::TenantFamily;
use serde_json::Value;

const BOOKS_KEY: &str = "Libros";
const NOTES_KEY: &str = "Notas";

/// Mapper for the south schema family
#[derive(Debug, Clone, Copy, Default)]
pub struct SouthResponseMapper;

impl SouthResponseMapper {
    fn map_book(record: &Value) -> Book {
        Book {
            id: text(record, "Id"),
            title: text(record, "Titulo"),
            author: text(record, "Autor"),
            genre: text(record, "Genero"),
            image_url: text(record, "ImagenUrl"),
            publisher: text(record, "Editorial"),
            year: year(record, "Año"),
        }
    }

    fn map_note(record: &Value) -> Note {
        Note {
            id: text(record, "Id"),
            title: text(record, "TituloNota"),
            content: text(record, "Contenido"),
            note_type: flag(record, "ReseniaNota").map(|is_review| {
                if is_review {
                    NoteType::Review
                } else {
                    NoteType::Critique
                }
            }),
            owner_reference: None,
            created_at: timestamp(record, "FechaCreacionNota"),
            book: Self::map_note_book(record),
            user: Self::map_note_user(record),
        }
    }

    fn map_note_book(record: &Value) -> Option<Book> {
        let book = Book {
            title: text(record, "TituloLibro"),
            author: text(record, "NombreAutorLibro"),
            genre: text(record, "GeneroLibro"),
            ..Default::default()
        };
        (!book.is_empty()).then_some(book)
    }

    fn map_note_user(record: &Value) -> Option<PartnerUser> {
        let name = text(record, "NombreCompletoAutor")
            .map(|full| split_full_name(&full))
            .unwrap_or_default();
        let user = PartnerUser {
            email: text(record, "EmailAutor"),
            first_name: name.first_name,
            last_name: name.last_name,
        };
        (!user.is_empty()).then_some(user)
    }
}

impl ResponseMapper for SouthResponseMapper {
    fn family(&self) -> TenantFamily {
        TenantFamily::South
    }

    fn map_books(&self, document: &Value) -> Result<Vec<Book>, DomainError> {
        Ok(record_list(document, BOOKS_KEY)?
            .iter()
            .map(Self::map_book)
            .collect())
    }

    fn map_notes(&self, document: &Value) -> Result<Vec<Note>, DomainError> {
        Ok(record_list(document, NOTES_KEY)?
            .iter()
            .map(Self::map_note)
            .collect())
    }
}
