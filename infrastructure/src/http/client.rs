//! reqwest-backed upstream client

use super::endpoint::UpstreamEndpoint;
use async_trait::async_trait;
use notehub_application::{
    QueryParams, TransportError, UpstreamClient, UpstreamResource, UpstreamResponse,
};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("notehub/", env!("CARGO_PKG_VERSION"));

/// Default request timeout when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues `GET` requests against the configured tenant endpoints
///
/// Any status the partner answers with is returned as a response; only
/// failures to get an answer become [`TransportError`]s.
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    http_client: reqwest::Client,
    endpoints: BTreeMap<String, UpstreamEndpoint>,
}

impl HttpUpstreamClient {
    pub fn new(
        endpoints: BTreeMap<String, UpstreamEndpoint>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoints,
        })
    }

    pub fn endpoint(&self, tenant: &str) -> Option<&UpstreamEndpoint> {
        self.endpoints.get(tenant)
    }

    /// Build the request without sending it
    pub fn build_request(
        &self,
        tenant: &str,
        resource: UpstreamResource,
        params: &QueryParams,
    ) -> Result<reqwest::Request, TransportError> {
        let endpoint = self
            .endpoint(tenant)
            .ok_or_else(|| TransportError::NotConfigured(tenant.to_string()))?;

        let query: Vec<(&str, &str)> = params.iter().collect();
        self.http_client
            .get(endpoint.url_for(resource))
            .query(&query)
            .build()
            .map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn fetch(
        &self,
        tenant: &str,
        resource: UpstreamResource,
        params: &QueryParams,
    ) -> Result<UpstreamResponse, TransportError> {
        let request = self.build_request(tenant, resource, params)?;
        debug!("GET {} for tenant {}", request.url(), tenant);

        let response = self.http_client.execute(request).await.map_err(|e| {
            warn!("Request to tenant {} failed: {}", tenant, e);
            map_reqwest_error(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        debug!("Tenant {} answered {} ({} bytes)", tenant, status, body.len());

        Ok(UpstreamResponse::new(status, body))
    }
}
