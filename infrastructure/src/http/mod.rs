//! HTTP transport to partner services
//!
//! [`HttpUpstreamClient`] implements the application's `UpstreamClient` port
//! over `reqwest`, with one [`UpstreamEndpoint`] per tenant.

mod client;
mod endpoint;

pub use client::HttpUpstreamClient;
pub use endpoint::UpstreamEndpoint;
