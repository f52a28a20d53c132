// Refresh orchestrator - Concurrent loads, partial failure, periodic polling
use crate::application::dashboard_api::{DashboardApi, Endpoint};
use crate::application::error::LoadError;
use crate::application::loaders::load;
use crate::presentation::surface::ViewSurface;
use crate::presentation::view::{ApplyOutcome, DashboardView};
use chrono::{DateTime, Local};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// Outcome of one refresh cycle.
#[derive(Debug)]
pub struct RefreshReport {
    pub sequence: u64,
    pub applied: Vec<Endpoint>,
    /// Loaded fine but superseded by a newer refresh
    pub discarded: Vec<Endpoint>,
    pub failures: Vec<LoadError>,
    pub synced_at: DateTime<Local>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct RefreshService<S> {
    api: Arc<dyn DashboardApi>,
    view: Arc<Mutex<DashboardView<S>>>,
    sequence: AtomicU64,
    /// Sequence of the last refresh that settled
    settled: watch::Sender<u64>,
}

impl<S: ViewSurface + 'static> RefreshService<S> {
    pub fn new(api: Arc<dyn DashboardApi>, view: Arc<Mutex<DashboardView<S>>>) -> Self {
        Self {
            api,
            view,
            sequence: AtomicU64::new(0),
            settled: watch::Sender::new(0),
        }
    }

    pub fn view(&self) -> &Arc<Mutex<DashboardView<S>>> {
        &self.view
    }

    /// Notified each time a refresh settles, whoever started it.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.settled.subscribe()
    }

    /// Loads every endpoint concurrently and applies each result as it lands.
    ///
    /// Never fails: loader errors are logged, shown as notifications and
    /// returned in the report. The last-synced slot is written exactly once.
    pub async fn refresh_all(&self) -> RefreshReport {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(sequence, "Refresh started");

        let api = &*self.api;
        let mut pending: FuturesUnordered<_> = Endpoint::ALL
            .into_iter()
            .map(|endpoint| load(api, endpoint))
            .collect();

        let mut applied = Vec::new();
        let mut discarded = Vec::new();
        let mut failures = Vec::new();

        while let Some(outcome) = pending.next().await {
            match outcome {
                Ok(payload) => {
                    let endpoint = payload.endpoint();
                    match self.view.lock().await.apply(sequence, payload) {
                        ApplyOutcome::Applied => applied.push(endpoint),
                        ApplyOutcome::Stale => discarded.push(endpoint),
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        sequence,
                        endpoint = %error.endpoint(),
                        kind = error.kind(),
                        "{}",
                        error
                    );
                    self.view.lock().await.show_error(&error);
                    failures.push(error);
                }
            }
        }

        let synced_at = Local::now();
        self.view.lock().await.update_last_sync(synced_at);

        let report = RefreshReport {
            sequence,
            applied,
            discarded,
            failures,
            synced_at,
        };

        if report.is_complete() {
            tracing::info!(
                sequence,
                applied = report.applied.len(),
                discarded = report.discarded.len(),
                "Dashboard refreshed"
            );
        } else {
            tracing::warn!(
                sequence,
                applied = report.applied.len(),
                failed = report.failures.len(),
                "Dashboard refreshed with failures"
            );
        }

        self.settled.send_replace(sequence);
        report
    }

    /// Refreshes immediately, then every `interval`.
    ///
    /// Each tick runs in its own task, so a slow refresh does not hold back
    /// the next one; overlapping refreshes race on the view.
    pub fn spawn_scheduler(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let service = self.clone();
                tokio::spawn(async move {
                    service.refresh_all().await;
                });
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_api::{transport_failure, ApiResponse, MockDashboardApi};
    use crate::application::error::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use crate::domain::navigation::Navigation;
    use crate::domain::vehicle::StatusClass;
    use crate::presentation::bindings::ViewBindings;
    use crate::presentation::surface::{Cell, MemorySurface};
    use serde_json::json;

    fn dashboard_body() -> String {
        json!({
            "active_drivers": 5,
            "total_vehicles": 12,
            "financial_metrics": {"ca_semaine": 1000, "ca_jour": 150},
            "vehicle_status": {"free": 4, "managed": 6, "repair": 2}
        })
        .to_string()
    }

    fn vehicles_body() -> String {
        json!({
            "vehicles": [
                {
                    "id": "v1",
                    "registration": "AB-123",
                    "type": "van",
                    "status": "Repair",
                    "driver": "J. Doe"
                }
            ]
        })
        .to_string()
    }

    fn point_fs_body() -> String {
        json!({
            "daily_stops": [{"date": "2024-03-01", "count": 14}],
            "weekly_overview": [{"week": "S9", "value": 3200.5}]
        })
        .to_string()
    }

    fn healthy_body(endpoint: Endpoint) -> String {
        match endpoint {
            Endpoint::DashboardData => dashboard_body(),
            Endpoint::Vehicles => vehicles_body(),
            Endpoint::PointFs => point_fs_body(),
        }
    }

    fn service_with(
        api: Arc<dyn DashboardApi>,
        discard_stale: bool,
    ) -> RefreshService<MemorySurface> {
        let sections: Vec<String> = vec!["dashboard".into(), "vehicles".into()];
        let view = DashboardView::new(
            MemorySurface::new(),
            ViewBindings::new(&sections),
            Navigation::new(sections, "dashboard").unwrap(),
            discard_stale,
        );
        RefreshService::new(api, Arc::new(Mutex::new(view)))
    }

    fn service(api: MockDashboardApi) -> RefreshService<MemorySurface> {
        service_with(Arc::new(api), false)
    }

    /// Backend whose first three answers are slow and carry older data.
    #[derive(Default)]
    struct SlowThenFastApi {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DashboardApi for SlowThenFastApi {
        async fn fetch(&self, endpoint: Endpoint) -> Result<ApiResponse, TransportError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) >= 3 {
                return Ok(ApiResponse::ok(healthy_body(endpoint)));
            }

            tokio::time::sleep(Duration::from_secs(10)).await;
            let body = match endpoint {
                Endpoint::DashboardData => json!({
                    "active_drivers": 1,
                    "total_vehicles": 1,
                    "financial_metrics": {"ca_semaine": 0, "ca_jour": 0},
                    "vehicle_status": {"free": 1, "managed": 0, "repair": 0}
                }),
                Endpoint::Vehicles => json!({"vehicles": []}),
                Endpoint::PointFs => json!({"daily_stops": [], "weekly_overview": []}),
            };
            Ok(ApiResponse::ok(body.to_string()))
        }
    }

    /// Starts a slow refresh, lets it issue its requests, then runs a fast one.
    async fn overlapping_refreshes(
        service: Arc<RefreshService<MemorySurface>>,
    ) -> (RefreshReport, RefreshReport) {
        let slow = tokio::spawn({
            let service = service.clone();
            async move { service.refresh_all().await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;

        let fast = service.refresh_all().await;
        let slow = slow.await.unwrap();
        (slow, fast)
    }

    fn healthy_api() -> MockDashboardApi {
        let mut api = MockDashboardApi::new();
        api.expect_fetch()
            .returning(|endpoint| Ok(ApiResponse::ok(healthy_body(endpoint))));
        api
    }

    #[tokio::test]
    async fn test_refresh_renders_every_slice() {
        let service = service(healthy_api());
        let report = service.refresh_all().await;

        assert!(report.is_complete());
        assert_eq!(report.applied.len(), 3);

        let view = service.view().lock().await;
        let surface = view.surface();
        assert_eq!(surface.text("activeDrivers"), Some("5"));
        assert_eq!(surface.text("totalVehicles"), Some("12"));
        assert_eq!(surface.text("caSemaine"), Some("€1000"));
        assert_eq!(surface.text("caJour"), Some("€150"));
        assert_eq!(
            surface.chart("vehicleStatusChart").unwrap().dataset.data,
            vec![4.0, 6.0, 2.0]
        );

        let rows = surface.table("vehiclesTable");
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].cells[2],
            Cell::Badge {
                class: StatusClass::Danger,
                text: "Repair".into()
            }
        );

        assert_eq!(
            surface.chart("dailyStopsChart").unwrap().dataset.data,
            vec![14.0]
        );
        assert!(surface.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_remote_error_is_isolated_to_its_loader() {
        for failing in Endpoint::ALL {
            let mut api = MockDashboardApi::new();
            api.expect_fetch().returning(move |endpoint| {
                if endpoint == failing {
                    Ok(ApiResponse::ok(json!({"error": "No data found"}).to_string()))
                } else {
                    Ok(ApiResponse::ok(healthy_body(endpoint)))
                }
            });
            let service = service(api);

            let report = service.refresh_all().await;
            assert_eq!(report.failures.len(), 1);
            assert!(matches!(report.failures[0], LoadError::Remote { .. }));
            assert_eq!(report.applied.len(), 2);
            assert!(!report.applied.contains(&failing));

            let view = service.view().lock().await;
            let surface = view.surface();
            assert_eq!(surface.notifications().len(), 1);
            assert_eq!(surface.notifications()[0].message, failing.failure_message());

            // Nothing from the failed payload reached the view.
            match failing {
                Endpoint::DashboardData => {
                    assert_eq!(surface.text("activeDrivers"), None);
                    assert_eq!(
                        surface.chart("vehicleStatusChart").unwrap().dataset.data,
                        vec![0.0, 0.0, 0.0]
                    );
                }
                Endpoint::Vehicles => assert!(surface.table("vehiclesTable").is_empty()),
                Endpoint::PointFs => {
                    assert!(surface.chart("dailyStopsChart").unwrap().dataset.data.is_empty())
                }
            }
        }
    }

    #[tokio::test]
    async fn test_transport_failures_never_escape_refresh() {
        let mut api = MockDashboardApi::new();
        api.expect_fetch().returning(|_| Err(transport_failure()));
        let service = service(api);

        let report = service.refresh_all().await;
        assert_eq!(report.failures.len(), 3);
        assert!(report
            .failures
            .iter()
            .all(|e| matches!(e, LoadError::Transport { .. })));

        let view = service.view().lock().await;
        assert_eq!(view.surface().notifications().len(), 3);
    }

    #[tokio::test]
    async fn test_last_sync_written_once_per_refresh_even_when_all_fail() {
        let mut api = MockDashboardApi::new();
        api.expect_fetch().returning(|_| Err(transport_failure()));
        let service = service(api);

        service.refresh_all().await;
        assert_eq!(
            service.view().lock().await.surface().text_writes("lastSyncTime"),
            1
        );

        service.refresh_all().await;
        let view = service.view().lock().await;
        assert_eq!(view.surface().text_writes("lastSyncTime"), 2);
        assert!(view.surface().text("lastSyncTime").is_some());
    }

    #[tokio::test]
    async fn test_identical_refreshes_render_identically() {
        let service = service(healthy_api());

        service.refresh_all().await;
        let mut first = service.view().lock().await.surface().rendered().clone();
        service.refresh_all().await;
        let mut second = service.view().lock().await.surface().rendered().clone();

        first.texts.remove("lastSyncTime");
        second.texts.remove("lastSyncTime");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_sequence_numbers_increase() {
        let service = service(healthy_api());
        let first = service.refresh_all().await;
        let second = service.refresh_all().await;
        assert!(second.sequence > first.sequence);
    }

    #[tokio::test(start_paused = true)]
    async fn test_older_refresh_is_discarded_when_stale_discarding_is_on() {
        let service = Arc::new(service_with(Arc::new(SlowThenFastApi::default()), true));

        let (slow, fast) = overlapping_refreshes(service.clone()).await;
        assert!(slow.sequence < fast.sequence);
        assert_eq!(fast.applied.len(), 3);
        assert!(slow.applied.is_empty());
        assert_eq!(slow.discarded.len(), 3);
        assert!(slow.is_complete());

        let view = service.view().lock().await;
        assert_eq!(view.surface().text("activeDrivers"), Some("5"));
        assert_eq!(view.surface().table("vehiclesTable").len(), 1);
        assert_eq!(
            view.surface().chart("dailyStopsChart").unwrap().dataset.data,
            vec![14.0]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_refreshes_race_by_default() {
        let service = Arc::new(service_with(Arc::new(SlowThenFastApi::default()), false));

        let (slow, fast) = overlapping_refreshes(service.clone()).await;
        assert_eq!(fast.applied.len(), 3);
        assert_eq!(slow.applied.len(), 3);
        assert!(slow.discarded.is_empty());

        // Last write wins: the slow refresh landed after the fast one.
        let view = service.view().lock().await;
        assert_eq!(view.surface().text("activeDrivers"), Some("1"));
        assert!(view.surface().table("vehiclesTable").is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_every_settled_refresh() {
        let service = service(healthy_api());
        let mut settled = service.subscribe();

        let report = service.refresh_all().await;
        assert!(settled.has_changed().unwrap());
        assert_eq!(*settled.borrow_and_update(), report.sequence);
        assert!(!settled.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_refreshes_at_startup_and_on_interval() {
        let service = Arc::new(service(healthy_api()));
        let handle = service.clone().spawn_scheduler(Duration::from_secs(300));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(
            service.view().lock().await.surface().text_writes("lastSyncTime"),
            1
        );

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(
            service.view().lock().await.surface().text_writes("lastSyncTime"),
            2
        );

        handle.abort();
    }
}
