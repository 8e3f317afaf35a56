//! Full-name splitting policy for partners that send one combined author name
//!
//! Known limitation: the policy is lossy for names with more than two
//! components ("Ana Maria Gomez" loses "Maria", and the parts come out
//! swapped relative to the usual reading). Downstream consumers depend on
//! this exact output, so it must not change without a product decision.

use serde::Serialize;

/// First and last name as produced by [`split_full_name`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameParts {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Split a combined name on whitespace
///
/// The first name is the last token. The last name is the first token of
/// everything before it.
///
/// # Example
///
/// ```
/// use notehub_domain::mapping::split_full_name;
///
/// let parts = split_full_name("Ana Maria Gomez");
/// assert_eq!(parts.first_name.as_deref(), Some("Gomez"));
/// assert_eq!(parts.last_name.as_deref(), Some("Ana"));
/// ```
pub fn split_full_name(full_name: &str) -> NameParts {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    match tokens.split_last() {
        None => NameParts::default(),
        Some((last, leading)) => NameParts {
            first_name: Some(last.to_string()),
            last_name: leading.first().map(|s| s.to_string()),
        },
    }
}
