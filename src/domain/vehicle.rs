// Vehicle domain model
use serde::Deserialize;

/// A fleet vehicle as reported by `/api/vehicles`.
///
/// `status` keeps the backend's raw text so the table shows exactly what the
/// backend sent; use [`Vehicle::status_kind`] for the interpreted value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub registration: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub status: String,
    /// `None` when no driver is assigned (`null` or missing in the payload).
    #[serde(default)]
    pub driver: Option<String>,
}

impl Vehicle {
    pub fn status_kind(&self) -> VehicleStatus {
        VehicleStatus::parse(&self.status)
    }

    pub fn status_class(&self) -> StatusClass {
        self.status_kind().class()
    }

    pub fn driver_name(&self) -> &str {
        self.driver.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleStatus {
    Free,
    Managed,
    Repair,
    Other,
}

impl VehicleStatus {
    /// Case-insensitive; anything unrecognised is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "free" => VehicleStatus::Free,
            "managed" => VehicleStatus::Managed,
            "repair" => VehicleStatus::Repair,
            _ => VehicleStatus::Other,
        }
    }

    pub fn class(self) -> StatusClass {
        match self {
            VehicleStatus::Free => StatusClass::Success,
            VehicleStatus::Managed => StatusClass::Primary,
            VehicleStatus::Repair => StatusClass::Danger,
            VehicleStatus::Other => StatusClass::Secondary,
        }
    }
}

/// Badge colour classification for a vehicle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// Positive (free)
    Success,
    /// Informational (managed)
    Primary,
    /// Critical (in repair)
    Danger,
    /// Neutral default
    Secondary,
}

impl StatusClass {
    pub fn label(self) -> &'static str {
        match self {
            StatusClass::Success => "success",
            StatusClass::Primary => "primary",
            StatusClass::Danger => "danger",
            StatusClass::Secondary => "secondary",
        }
    }
}
