//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod create_note;
pub mod dispatch;
pub mod retrieve;
