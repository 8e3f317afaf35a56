//! Upstream client port
//!
//! Defines the interface for calling a partner service. The client returns
//! whatever status the partner answered with; only failures to obtain an
//! answer at all (timeout, connection problems) are errors.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that prevent an upstream response from being obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Upstream request timed out")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("No upstream endpoint configured for tenant {0}")]
    NotConfigured(String),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout)
    }
}

/// Partner resource to retrieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamResource {
    Notes,
    Books,
}

impl UpstreamResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamResource::Notes => "notes",
            UpstreamResource::Books => "books",
        }
    }
}

impl std::fmt::Display for UpstreamResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query parameters forwarded verbatim to the partner
///
/// Nothing in the core interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Raw partner answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport to partner services
///
/// Implementations resolve the tenant's endpoint themselves and must bound
/// every call with a timeout.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn fetch(
        &self,
        tenant: &str,
        resource: UpstreamResource,
        params: &QueryParams,
    ) -> Result<UpstreamResponse, TransportError>;
}
