// Point FS time-series domain models
use serde::Deserialize;

/// A labelled value, ready to be pushed into a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub label: String,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(label: String, value: f64) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyStops {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeeklyOverview {
    pub week: String,
    pub value: f64,
}

/// Stop counts and weekly performance from `/api/point-fs`, in backend order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointFsSeries {
    pub daily_stops: Vec<DailyStops>,
    pub weekly_overview: Vec<WeeklyOverview>,
}

impl PointFsSeries {
    pub fn daily_stop_points(&self) -> Vec<TimeSeriesPoint> {
        self.daily_stops
            .iter()
            .map(|d| TimeSeriesPoint::new(d.date.clone(), d.count as f64))
            .collect()
    }

    pub fn weekly_overview_points(&self) -> Vec<TimeSeriesPoint> {
        self.weekly_overview
            .iter()
            .map(|w| TimeSeriesPoint::new(w.week.clone(), w.value))
            .collect()
    }
}
