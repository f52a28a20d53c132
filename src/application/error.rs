//! Error types for loading dashboard data

use crate::application::dashboard_api::Endpoint;
use thiserror::Error;

/// Failure to get a usable response from the backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, DNS, timeout or body read failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Error status whose body was not JSON
    #[error("HTTP status {status}")]
    Status { status: u16 },
}

/// Why a loader could not apply its payload.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Transport error loading {endpoint}: {source}")]
    Transport {
        endpoint: Endpoint,
        source: TransportError,
    },

    /// Malformed JSON or a body that does not match the expected shape
    #[error("Decode error loading {endpoint}: {source}")]
    Decode {
        endpoint: Endpoint,
        source: serde_json::Error,
    },

    /// The backend answered but reported an error in the body
    #[error("Backend error from {endpoint}: {message}")]
    Remote { endpoint: Endpoint, message: String },
}

impl LoadError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            LoadError::Transport { endpoint, .. }
            | LoadError::Decode { endpoint, .. }
            | LoadError::Remote { endpoint, .. } => *endpoint,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Transport { .. } => "transport",
            LoadError::Decode { .. } => "decode",
            LoadError::Remote { .. } => "remote",
        }
    }
}
