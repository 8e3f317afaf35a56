//! Where a tenant's partner service lives

use notehub_application::UpstreamResource;

/// Base URL plus the path of each resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    base_url: String,
    notes_path: String,
    books_path: String,
}

impl UpstreamEndpoint {
    pub fn new(
        base_url: impl Into<String>,
        notes_path: impl Into<String>,
        books_path: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            notes_path: notes_path.into(),
            books_path: books_path.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn notes_path(&self) -> &str {
        &self.notes_path
    }

    pub fn books_path(&self) -> &str {
        &self.books_path
    }

    /// Full URL of a resource, without query string
    pub fn url_for(&self, resource: UpstreamResource) -> String {
        let path = match resource {
            UpstreamResource::Notes => &self.notes_path,
            UpstreamResource::Books => &self.books_path,
        };
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
