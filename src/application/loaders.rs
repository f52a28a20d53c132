// Data loaders - Fetch and decode one endpoint each
use crate::application::dashboard_api::{ApiResponse, DashboardApi, Endpoint};
use crate::application::error::{LoadError, TransportError};
use crate::domain::dashboard::DashboardMetrics;
use crate::domain::point_fs::PointFsSeries;
use crate::domain::vehicle::Vehicle;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// A decoded payload, routed to the view slice that owns it.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Metrics(DashboardMetrics),
    Vehicles(Vec<Vehicle>),
    PointFs(PointFsSeries),
}

impl Payload {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Payload::Metrics(_) => Endpoint::DashboardData,
            Payload::Vehicles(_) => Endpoint::Vehicles,
            Payload::PointFs(_) => Endpoint::PointFs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VehiclesBody {
    vehicles: Vec<Vehicle>,
}

pub async fn load_dashboard_metrics(api: &dyn DashboardApi) -> Result<DashboardMetrics, LoadError> {
    fetch_decoded(api, Endpoint::DashboardData).await
}

pub async fn load_vehicles(api: &dyn DashboardApi) -> Result<Vec<Vehicle>, LoadError> {
    let body: VehiclesBody = fetch_decoded(api, Endpoint::Vehicles).await?;
    Ok(body.vehicles)
}

pub async fn load_point_fs(api: &dyn DashboardApi) -> Result<PointFsSeries, LoadError> {
    fetch_decoded(api, Endpoint::PointFs).await
}

/// Runs the loader for `endpoint` and wraps its result as a [`Payload`].
pub async fn load(api: &dyn DashboardApi, endpoint: Endpoint) -> Result<Payload, LoadError> {
    match endpoint {
        Endpoint::DashboardData => load_dashboard_metrics(api).await.map(Payload::Metrics),
        Endpoint::Vehicles => load_vehicles(api).await.map(Payload::Vehicles),
        Endpoint::PointFs => load_point_fs(api).await.map(Payload::PointFs),
    }
}

async fn fetch_decoded<T: DeserializeOwned>(
    api: &dyn DashboardApi,
    endpoint: Endpoint,
) -> Result<T, LoadError> {
    let response = api
        .fetch(endpoint)
        .await
        .map_err(|source| LoadError::Transport { endpoint, source })?;

    decode_response(endpoint, response)
}

/// Decodes a body, checking the backend's `error` field before the typed shape.
pub fn decode_response<T: DeserializeOwned>(
    endpoint: Endpoint,
    response: ApiResponse,
) -> Result<T, LoadError> {
    let value: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(_) if !response.is_success() => {
            return Err(LoadError::Transport {
                endpoint,
                source: TransportError::Status {
                    status: response.status,
                },
            });
        }
        Err(source) => return Err(LoadError::Decode { endpoint, source }),
    };

    if let Some(message) = value.get("error").and_then(remote_error_message) {
        return Err(LoadError::Remote { endpoint, message });
    }

    serde_json::from_value(value).map_err(|source| LoadError::Decode { endpoint, source })
}

/// Returns a message when the `error` field is truthy.
fn remote_error_message(error: &Value) -> Option<String> {
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
