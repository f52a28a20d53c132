// HTTP implementation of the dashboard backend API
use crate::application::dashboard_api::{ApiResponse, DashboardApi, Endpoint};
use crate::application::error::TransportError;
use crate::infrastructure::config::endpoint_url;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDashboardApi {
    pub fn new(base_url: String, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_url(&self, endpoint: Endpoint) -> String {
        endpoint_url(&self.base_url, endpoint.path())
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch(&self, endpoint: Endpoint) -> Result<ApiResponse, TransportError> {
        let url = self.build_url(endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(%endpoint, status, bytes = body.len(), "Response received");

        Ok(ApiResponse { status, body })
    }
}
