//! "North" family mapper
//!
//! Lower-case Spanish keys. Notes carry a `tipo` enumeration and nest both
//! their author (`autor`) and their book (`libro`).

use super::ResponseMapper;
use super::fields::{object, record_list, text, timestamp, year};
use crate::core::error::DomainError;
use crate::note::{Book, Note, NoteType, PartnerUser};
use crate::tenant::TenantFamily;
use serde_json::Value;

const BOOKS_KEY: &str = "libros";
const NOTES_KEY: &str = "notas";

/// Mapper for the north schema family
#[derive(Debug, Clone, Copy, Default)]
pub struct NorthResponseMapper;

impl NorthResponseMapper {
    fn map_book(record: &Value) -> Book {
        Book {
            id: text(record, "id"),
            title: text(record, "titulo"),
            author: text(record, "autor"),
            genre: text(record, "genero"),
            image_url: text(record, "imagen_url"),
            publisher: text(record, "editorial"),
            year: year(record, "año"),
        }
    }

    fn map_note(record: &Value) -> Note {
        Note {
            id: text(record, "id"),
            title: text(record, "titulo"),
            content: text(record, "contenido"),
            note_type: record
                .get("tipo")
                .and_then(Value::as_str)
                .and_then(note_type_of),
            owner_reference: None,
            created_at: timestamp(record, "fecha_creacion"),
            book: object(record, "libro").map(Self::map_note_book),
            user: object(record, "autor").map(Self::map_note_user),
        }
    }

    fn map_note_book(book: &Value) -> Book {
        Book {
            title: text(book, "titulo"),
            author: text(book, "autor"),
            genre: text(book, "genero"),
            ..Default::default()
        }
    }

    fn map_note_user(author: &Value) -> PartnerUser {
        let contact = object(author, "datos_de_contacto");
        let personal = object(author, "datos_personales");
        PartnerUser {
            email: contact.and_then(|c| text(c, "email")),
            first_name: personal.and_then(|p| text(p, "nombre")),
            last_name: personal.and_then(|p| text(p, "apellido")),
        }
    }
}

/// `tipo` values: "resenia" is a review, "opinion" and "critica" are critiques
fn note_type_of(tipo: &str) -> Option<NoteType> {
    match tipo.trim().to_lowercase().as_str() {
        "resenia" => Some(NoteType::Review),
        "opinion" | "critica" => Some(NoteType::Critique),
        _ => None,
    }
}

impl ResponseMapper for NorthResponseMapper {
    fn family(&self) -> TenantFamily {
        TenantFamily::North
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn full_note() -> Value {
        json!({
            "id": 1,
            "titulo": "T",
            "tipo": "resenia",
            "fecha_creacion": "2024-01-01",
            "contenido": "c",
            "autor": {
                "datos_de_contacto": {"email": "ana@north.example"},
                "datos_personales": {"nombre": "Ana", "apellido": "Gomez"}
            },
            "libro": {"titulo": "B", "autor": "A", "genero": "G"}
        })
    }

    #[test]
    fn test_map_full_note() {
        let notes = NorthResponseMapper
            .map_notes(&json!({"notas": [full_note()]}))
            .unwrap();
        assert_eq!(notes.len(), 1);

        let note = &notes[0];
        assert_eq!(note.id.as_deref(), Some("1"));
        assert_eq!(note.title.as_deref(), Some("T"));
        assert_eq!(note.note_type, Some(NoteType::Review));
        assert_eq!(note.content.as_deref(), Some("c"));
        assert_eq!(
            note.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(note.owner_reference, None);

        let book = note.book.as_ref().unwrap();
        assert_eq!(book.title.as_deref(), Some("B"));
        assert_eq!(book.author.as_deref(), Some("A"));
        assert_eq!(book.genre.as_deref(), Some("G"));
        assert_eq!(book.id, None);

        let user = note.user.as_ref().unwrap();
        assert_eq!(user.email.as_deref(), Some("ana@north.example"));
        assert_eq!(user.first_name.as_deref(), Some("Ana"));
        assert_eq!(user.last_name.as_deref(), Some("Gomez"));
    }

    #[test]
    fn test_tipo_mapping() {
        assert_eq!(note_type_of("resenia"), Some(NoteType::Review));
        assert_eq!(note_type_of("opinion"), Some(NoteType::Critique));
        assert_eq!(note_type_of("critica"), Some(NoteType::Critique));
        assert_eq!(note_type_of("Resenia "), Some(NoteType::Review));
        assert_eq!(note_type_of("otra"), None);
    }

    #[test]
    fn test_missing_optional_fields_degrade() {
        let notes = NorthResponseMapper
            .map_notes(&json!({"notas": [{"titulo": "Solo titulo"}]}))
            .unwrap();
        let note = &notes[0];
        assert_eq!(note.title.as_deref(), Some("Solo titulo"));
        assert_eq!(note.content, None);
        assert_eq!(note.note_type, None);
        assert_eq!(note.book, None);
        assert_eq!(note.user, None);
    }

    #[test]
    fn test_partial_author() {
        let notes = NorthResponseMapper
            .map_notes(&json!({"notas": [{"autor": {"datos_personales": {"nombre": "Ana"}}}]}))
            .unwrap();
        let user = notes[0].user.as_ref().unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Ana"));
        assert_eq!(user.last_name, None);
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_map_notes_preserves_length_and_order() {
        let records: Vec<Value> = (0..5)
            .map(|i| json!({"id": i, "titulo": format!("nota {}", i)}))
            .chain(std::iter::once(json!("basura")))
            .collect();
        let notes = NorthResponseMapper
            .map_notes(&json!({"notas": records}))
            .unwrap();
        assert_eq!(notes.len(), 6);
        for (i, note) in notes.iter().take(5).enumerate() {
            assert_eq!(note.id, Some(i.to_string()));
        }
        assert_eq!(notes[5], Note::default());
    }

    #[test]
    fn test_map_books() {
        let doc = json!({"libros": [
            {
                "id": 10,
                "titulo": "Rayuela",
                "autor": "Julio Cortázar",
                "genero": "Novela",
                "imagen_url": "https://img.example/rayuela.png",
                "editorial": "Sudamericana",
                "año": 1963
            },
            {"id": 11}
        ]});
        let books = NorthResponseMapper.map_books(&doc).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(
            books[0],
            Book {
                id: Some("10".to_string()),
                title: Some("Rayuela".to_string()),
                author: Some("Julio Cortázar".to_string()),
                genre: Some("Novela".to_string()),
                image_url: Some("https://img.example/rayuela.png".to_string()),
                publisher: Some("Sudamericana".to_string()),
                year: Some(1963),
            }
        );
        assert_eq!(books[1].id.as_deref(), Some("11"));
        assert_eq!(books[1].title, None);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(NorthResponseMapper.map_notes(&json!({})).is_err());
        assert!(NorthResponseMapper.map_notes(&json!({"notas": "x"})).is_err());
        // South keys are not north keys
        assert!(NorthResponseMapper.map_books(&json!({"Libros": []})).is_err());
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        assert!(NorthResponseMapper
            .map_notes(&json!({"notas": []}))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let doc = json!({"notas": [full_note(), full_note()]});
        let before = doc.clone();
        let first = NorthResponseMapper.map_notes(&doc).unwrap();
        let second = NorthResponseMapper.map_notes(&doc).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc, before);
    }
}
