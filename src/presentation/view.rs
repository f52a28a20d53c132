// Dashboard view controller - Chart handles, UI state and view updaters
use crate::application::dashboard_api::Endpoint;
use crate::application::error::LoadError;
use crate::application::loaders::Payload;
use crate::domain::dashboard::{format_euros, DashboardMetrics};
use crate::domain::filter::{filter_vehicles, VehicleFilter};
use crate::domain::navigation::{Navigation, NavigationError};
use crate::domain::point_fs::PointFsSeries;
use crate::domain::vehicle::Vehicle;
use crate::presentation::bindings::ViewBindings;
use crate::presentation::charts::{SeriesChart, StatusChart};
use crate::presentation::surface::{Cell, Notification, TableRow, ViewSurface};
use chrono::{DateTime, Local};
use std::collections::HashMap;

/// Whether [`DashboardView::apply`] wrote the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// An older refresh finished after a newer one had already been applied
    Stale,
}

/// Built once at startup; every updater goes through it.
pub struct DashboardView<S> {
    surface: S,
    bindings: ViewBindings,
    navigation: Navigation,
    status_chart: StatusChart,
    weekly_performance_chart: SeriesChart,
    daily_stops_chart: SeriesChart,
    weekly_overview_chart: SeriesChart,
    /// Last successfully loaded list, unfiltered
    vehicles: Vec<Vehicle>,
    filter: VehicleFilter,
    sidebar_collapsed: bool,
    discard_stale: bool,
    applied_sequences: HashMap<Endpoint, u64>,
}

impl<S: ViewSurface> DashboardView<S> {
    pub fn new(
        surface: S,
        bindings: ViewBindings,
        navigation: Navigation,
        discard_stale: bool,
    ) -> Self {
        let mut view = Self {
            surface,
            status_chart: StatusChart::new(bindings.vehicle_status_chart.clone()),
            weekly_performance_chart: SeriesChart::weekly_performance(
                bindings.weekly_performance_chart.clone(),
            ),
            daily_stops_chart: SeriesChart::daily_stops(bindings.daily_stops_chart.clone()),
            weekly_overview_chart: SeriesChart::weekly_overview(
                bindings.weekly_overview_chart.clone(),
            ),
            bindings,
            navigation,
            vehicles: Vec::new(),
            filter: VehicleFilter::default(),
            sidebar_collapsed: false,
            discard_stale,
            applied_sequences: HashMap::new(),
        };

        view.status_chart.render(&mut view.surface);
        view.weekly_performance_chart.render(&mut view.surface);
        view.daily_stops_chart.render(&mut view.surface);
        view.weekly_overview_chart.render(&mut view.surface);
        view.mirror_navigation();
        view
    }

    /// Routes a loaded payload to its updater.
    ///
    /// With stale discarding on, a payload from a refresh older than the one
    /// last applied to the same slice is dropped.
    pub fn apply(&mut self, sequence: u64, payload: Payload) -> ApplyOutcome {
        let endpoint = payload.endpoint();
        let latest = self.applied_sequences.get(&endpoint).copied().unwrap_or(0);

        if self.discard_stale && sequence < latest {
            tracing::debug!(%endpoint, sequence, latest, "Discarding stale payload");
            return ApplyOutcome::Stale;
        }
        self.applied_sequences.insert(endpoint, latest.max(sequence));

        match payload {
            Payload::Metrics(metrics) => self.update_dashboard_metrics(&metrics),
            Payload::Vehicles(vehicles) => self.update_vehicles_table(vehicles),
            Payload::PointFs(series) => self.update_point_fs_charts(&series),
        }

        ApplyOutcome::Applied
    }

    pub fn update_dashboard_metrics(&mut self, metrics: &DashboardMetrics) {
        let b = &self.bindings;
        self.surface.set_text(&b.active_drivers, &metrics.active_drivers.to_string());
        self.surface.set_text(&b.total_vehicles, &metrics.total_vehicles.to_string());
        self.surface
            .set_text(&b.ca_semaine, &format_euros(metrics.financial_metrics.ca_semaine));
        self.surface.set_text(&b.ca_jour, &format_euros(metrics.financial_metrics.ca_jour));

        self.status_chart.set_counts(&metrics.vehicle_status);
        self.status_chart.render(&mut self.surface);
    }

    /// Stores the list and re-renders the table through the current filter.
    pub fn update_vehicles_table(&mut self, vehicles: Vec<Vehicle>) {
        self.vehicles = vehicles;
        self.render_vehicles_table();
    }

    fn render_vehicles_table(&mut self) {
        let rows = filter_vehicles(&self.vehicles, &self.filter)
            .iter()
            .map(vehicle_row)
            .collect();
        self.surface.replace_table_body(&self.bindings.vehicles_table, rows);
    }

    pub fn update_point_fs_charts(&mut self, series: &PointFsSeries) {
        self.daily_stops_chart.set_points(&series.daily_stop_points());
        self.daily_stops_chart.render(&mut self.surface);

        self.weekly_overview_chart.set_points(&series.weekly_overview_points());
        self.weekly_overview_chart.render(&mut self.surface);
    }

    pub fn update_last_sync(&mut self, at: DateTime<Local>) {
        let text = at.format("%H:%M").to_string();
        self.surface.set_text(&self.bindings.last_sync_time, &text);
    }

    pub fn show_section(&mut self, section: &str) -> Result<(), NavigationError> {
        self.navigation.activate(section)?;
        self.mirror_navigation();
        Ok(())
    }

    /// Deactivates every panel and nav item, then activates the current one.
    fn mirror_navigation(&mut self) {
        for (id, binding) in self.bindings.sections() {
            let active = self.navigation.is_active(id);
            self.surface.set_active(&binding.panel, active);
            self.surface.set_active(&binding.nav_item, active);
        }
    }

    /// Collapses or expands the sidebar and content together; returns the new state.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.surface.set_active(&self.bindings.sidebar, self.sidebar_collapsed);
        self.surface.set_active(&self.bindings.content, self.sidebar_collapsed);
        self.sidebar_collapsed
    }

    pub fn set_filter(&mut self, filter: VehicleFilter) {
        let b = &self.bindings;
        self.surface
            .set_text(&b.vehicle_type_filter, filter.vehicle_type.as_deref().unwrap_or("all"));
        self.surface
            .set_text(&b.status_filter, filter.status.as_deref().unwrap_or("all"));

        self.filter = filter;
        self.render_vehicles_table();
    }

    pub fn show_error(&mut self, error: &LoadError) {
        self.surface
            .notify(Notification::error(error.endpoint().failure_message()));
    }

    pub fn vehicle_details(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn active_section(&self) -> &str {
        self.navigation.active()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

fn vehicle_row(vehicle: &Vehicle) -> TableRow {
    TableRow {
        cells: vec![
            Cell::Text(vehicle.registration.clone()),
            Cell::Text(vehicle.vehicle_type.clone()),
            Cell::Badge {
                class: vehicle.status_class(),
                text: vehicle.status.clone(),
            },
            Cell::Text(vehicle.driver_name().to_string()),
            Cell::Action {
                label: "Details".to_string(),
                target: vehicle.id.clone(),
            },
        ],
    }
}
