// Chart adapters - Typed wrappers over the chart widgets
use crate::domain::dashboard::VehicleStatusCounts;
use crate::domain::point_fs::TimeSeriesPoint;
use crate::presentation::surface::ViewSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// One colour per slice for doughnuts, a single line/bar colour otherwise
    pub colors: Vec<String>,
    pub fill: bool,
}

/// What the chart library is handed on every update.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub dataset: Dataset,
}

impl ChartData {
    fn new(kind: ChartKind, labels: Vec<String>, dataset: Dataset) -> Self {
        Self {
            kind,
            labels,
            dataset,
        }
    }
}

/// Free / managed / in-repair doughnut.
#[derive(Debug, Clone)]
pub struct StatusChart {
    element: String,
    data: ChartData,
}

impl StatusChart {
    pub fn new(element: String) -> Self {
        let dataset = Dataset {
            label: None,
            data: vec![0.0, 0.0, 0.0],
            colors: vec!["#2ecc71".into(), "#3498db".into(), "#e74c3c".into()],
            fill: true,
        };
        let labels = vec!["Free".into(), "Managed".into(), "In Repair".into()];

        Self {
            element,
            data: ChartData::new(ChartKind::Doughnut, labels, dataset),
        }
    }

    pub fn set_counts(&mut self, counts: &VehicleStatusCounts) {
        self.data.dataset.data = counts.as_dataset();
    }

    pub fn render<S: ViewSurface>(&self, surface: &mut S) {
        surface.render_chart(&self.element, &self.data);
    }
}

/// Single-dataset line or bar chart fed with labelled points.
#[derive(Debug, Clone)]
pub struct SeriesChart {
    element: String,
    data: ChartData,
}

impl SeriesChart {
    fn new(element: String, kind: ChartKind, label: &str, color: &str) -> Self {
        let dataset = Dataset {
            label: Some(label.to_string()),
            data: Vec::new(),
            colors: vec![color.to_string()],
            fill: kind == ChartKind::Bar,
        };

        Self {
            element,
            data: ChartData::new(kind, Vec::new(), dataset),
        }
    }

    pub fn weekly_performance(element: String) -> Self {
        Self::new(element, ChartKind::Line, "Performance", "#3498db")
    }

    pub fn daily_stops(element: String) -> Self {
        Self::new(element, ChartKind::Bar, "Daily Stops", "#3498db")
    }

    pub fn weekly_overview(element: String) -> Self {
        Self::new(element, ChartKind::Line, "Weekly Overview", "#2ecc71")
    }

    /// Replaces labels and data together so they never go out of step.
    pub fn set_points(&mut self, points: &[TimeSeriesPoint]) {
        self.data.labels = points.iter().map(|p| p.label.clone()).collect();
        self.data.dataset.data = points.iter().map(|p| p.value).collect();
    }

    pub fn render<S: ViewSurface>(&self, surface: &mut S) {
        surface.render_chart(&self.element, &self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::surface::MemorySurface;

    #[test]
    fn test_status_chart_starts_empty() {
        let mut surface = MemorySurface::new();
        StatusChart::new("vehicleStatusChart".into()).render(&mut surface);

        let data = surface.chart("vehicleStatusChart").unwrap();
        assert_eq!(data.kind, ChartKind::Doughnut);
        assert_eq!(data.labels, vec!["Free", "Managed", "In Repair"]);
        assert_eq!(data.dataset.data, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_set_points_replaces_previous_series() {
        let mut chart = SeriesChart::daily_stops("dailyStopsChart".into());
        chart.set_points(&[
            TimeSeriesPoint::new("Mon".into(), 3.0),
            TimeSeriesPoint::new("Tue".into(), 5.0),
        ]);
        chart.set_points(&[TimeSeriesPoint::new("Wed".into(), 8.0)]);

        let mut surface = MemorySurface::new();
        chart.render(&mut surface);

        let data = surface.chart("dailyStopsChart").unwrap();
        assert_eq!(data.labels, vec!["Wed"]);
        assert_eq!(data.dataset.data, vec![8.0]);
        assert_eq!(data.dataset.label.as_deref(), Some("Daily Stops"));
    }
}
