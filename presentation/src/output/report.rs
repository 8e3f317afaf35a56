//! Display-ready summaries assembled by the binary

use notehub_domain::{ContentLength, TenantFamily, TenantProfile, classify, word_count};
use serde::Serialize;

/// Word count and length class of a text for one tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    pub tenant: String,
    pub word_count: usize,
    pub length: ContentLength,
    pub short_threshold: u32,
    pub medium_threshold: u32,
}

impl ClassificationReport {
    pub fn new(text: &str, profile: &TenantProfile) -> Self {
        let words = word_count(Some(text));
        Self {
            tenant: profile.name().to_string(),
            word_count: words,
            length: classify(words, profile),
            short_threshold: profile.short_threshold(),
            medium_threshold: profile.medium_threshold(),
        }
    }
}

/// One configured tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantSummary {
    pub name: String,
    pub family: Option<TenantFamily>,
    pub short_threshold: u32,
    pub medium_threshold: u32,
    /// Base URL of the partner service, if one is configured
    pub endpoint: Option<String>,
    /// Owners mapped to this tenant
    pub owners: Vec<String>,
}
