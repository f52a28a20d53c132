// View bindings - Element ids resolved once at startup
use std::collections::BTreeMap;

/// Panel and navigation item for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBinding {
    /// Panel element, `{section}-section`
    pub panel: String,
    /// Navigation item carrying `data-section={section}`
    pub nav_item: String,
}

/// Typed handle set for every element the dashboard writes to.
#[derive(Debug, Clone)]
pub struct ViewBindings {
    pub sidebar: String,
    pub content: String,
    pub active_drivers: String,
    pub total_vehicles: String,
    pub ca_semaine: String,
    pub ca_jour: String,
    pub last_sync_time: String,
    pub vehicles_table: String,
    pub vehicle_type_filter: String,
    pub status_filter: String,
    pub vehicle_status_chart: String,
    pub weekly_performance_chart: String,
    pub daily_stops_chart: String,
    pub weekly_overview_chart: String,
    sections: BTreeMap<String, SectionBinding>,
}

impl ViewBindings {
    pub fn new(sections: &[String]) -> Self {
        let sections = sections
            .iter()
            .map(|id| {
                let binding = SectionBinding {
                    panel: format!("{}-section", id),
                    nav_item: format!("nav-{}", id),
                };
                (id.clone(), binding)
            })
            .collect();

        Self {
            sidebar: "sidebar".to_string(),
            content: "content".to_string(),
            active_drivers: "activeDrivers".to_string(),
            total_vehicles: "totalVehicles".to_string(),
            ca_semaine: "caSemaine".to_string(),
            ca_jour: "caJour".to_string(),
            last_sync_time: "lastSyncTime".to_string(),
            vehicles_table: "vehiclesTable".to_string(),
            vehicle_type_filter: "vehicleTypeFilter".to_string(),
            status_filter: "statusFilter".to_string(),
            vehicle_status_chart: "vehicleStatusChart".to_string(),
            weekly_performance_chart: "weeklyPerformanceChart".to_string(),
            daily_stops_chart: "dailyStopsChart".to_string(),
            weekly_overview_chart: "weeklyOverviewChart".to_string(),
            sections,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &SectionBinding)> {
        self.sections.iter().map(|(id, b)| (id.as_str(), b))
    }
}
