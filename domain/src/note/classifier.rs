//! Content length classification
//!
//! Word counts are bucketed against the tenant's thresholds. A count equal to
//! a threshold belongs to the lower bucket, which decides whether a review at
//! exactly the limit is accepted (it is).

use crate::tenant::TenantProfile;
use serde::{Deserialize, Serialize};

/// Length class of a note's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentLength {
    Short,
    Medium,
    Long,
}

impl ContentLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentLength::Short => "short",
            ContentLength::Medium => "medium",
            ContentLength::Long => "long",
        }
    }
}

impl std::fmt::Display for ContentLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Count maximal runs of non-whitespace characters
///
/// # Example
///
/// ```
/// use notehub_domain::note::word_count;
///
/// assert_eq!(word_count(None), 0);
/// assert_eq!(word_count(Some("Hello    world")), 2);
/// ```
pub fn word_count(content: Option<&str>) -> usize {
    content.map_or(0, |c| c.split_whitespace().count())
}

/// Bucket a word count with the profile's thresholds
pub fn classify(word_count: usize, profile: &TenantProfile) -> ContentLength {
    let short = profile.short_threshold() as usize;
    let medium = profile.medium_threshold() as usize;

    if word_count <= short {
        ContentLength::Short
    } else if word_count <= medium {
        ContentLength::Medium
    } else {
        ContentLength::Long
    }
}
