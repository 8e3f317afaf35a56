//! Note store adapters

mod memory;

pub use memory::InMemoryNoteStore;
