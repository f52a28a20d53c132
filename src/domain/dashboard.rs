// Dashboard metrics domain model
use serde::Deserialize;

/// Aggregate fleet figures from `/api/dashboard-data`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardMetrics {
    pub active_drivers: u64,
    pub total_vehicles: u64,
    pub financial_metrics: FinancialMetrics,
    pub vehicle_status: VehicleStatusCounts,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinancialMetrics {
    /// Weekly revenue
    pub ca_semaine: f64,
    /// Daily revenue
    pub ca_jour: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VehicleStatusCounts {
    pub free: u64,
    pub managed: u64,
    pub repair: u64,
}

impl VehicleStatusCounts {
    /// Dataset order matches the status chart labels: free, managed, in repair.
    pub fn as_dataset(&self) -> Vec<f64> {
        vec![self.free as f64, self.managed as f64, self.repair as f64]
    }
}

/// Formats an amount the way the revenue tiles show it, e.g. `€1000` or `€12.5`.
pub fn format_euros(amount: f64) -> String {
    format!("€{}", display_number(amount))
}

/// Shortest decimal form, switching to exponent notation below `1e-6` and
/// from `1e21` up, with `-0` shown as `0`.
fn display_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) && magnitude.is_finite() {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    value.to_string()
}
