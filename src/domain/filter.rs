// Client-side vehicle filtering
use super::vehicle::Vehicle;

/// Criteria from the vehicle-type and status filter controls.
///
/// `None` means the control is on "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleFilter {
    pub vehicle_type: Option<String>,
    pub status: Option<String>,
}

impl VehicleFilter {
    /// Builds a filter from raw control values; empty or `all` leaves that criterion open.
    pub fn from_controls(vehicle_type: &str, status: &str) -> Self {
        Self {
            vehicle_type: Self::criterion(vehicle_type),
            status: Self::criterion(status),
        }
    }

    fn criterion(raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(raw.to_string())
        }
    }

    pub fn is_open(&self) -> bool {
        self.vehicle_type.is_none() && self.status.is_none()
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let type_ok = self
            .vehicle_type
            .as_deref()
            .is_none_or(|t| vehicle.vehicle_type.to_lowercase() == t.to_lowercase());
        let status_ok = self
            .status
            .as_deref()
            .is_none_or(|s| vehicle.status.to_lowercase() == s.to_lowercase());

        type_ok && status_ok
    }
}

/// Narrows the last loaded vehicle list; never touches the network.
pub fn filter_vehicles(vehicles: &[Vehicle], filter: &VehicleFilter) -> Vec<Vehicle> {
    if filter.is_open() {
        return vehicles.to_vec();
    }

    vehicles.iter().filter(|v| filter.matches(v)).cloned().collect()
}
