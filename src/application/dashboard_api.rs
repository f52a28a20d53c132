// Backend API trait for dashboard data access
use crate::application::error::TransportError;
use async_trait::async_trait;
use std::fmt;

#[cfg(test)]
use mockall::automock;

/// The three JSON endpoints the dashboard polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DashboardData,
    Vehicles,
    PointFs,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [
        Endpoint::DashboardData,
        Endpoint::Vehicles,
        Endpoint::PointFs,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::DashboardData => "/api/dashboard-data",
            Endpoint::Vehicles => "/api/vehicles",
            Endpoint::PointFs => "/api/point-fs",
        }
    }

    /// Message shown to the user when a load from this endpoint fails
    pub fn failure_message(self) -> &'static str {
        match self {
            Endpoint::DashboardData => "Failed to load dashboard data",
            Endpoint::Vehicles => "Failed to load vehicles data",
            Endpoint::PointFs => "Failed to load Point FS data",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Raw HTTP outcome; decoding happens at the loader boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// GET one endpoint. Only transport failures are errors here; HTTP
    /// error statuses come back as a response so their JSON body can be read.
    async fn fetch(&self, endpoint: Endpoint) -> Result<ApiResponse, TransportError>;
}

/// A genuine `reqwest` failure for tests that need a transport error.
#[cfg(test)]
pub(crate) fn transport_failure() -> TransportError {
    let error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .expect_err("malformed URL must not build");
    TransportError::Request(error)
}
