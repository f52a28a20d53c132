// Main entry point - Dependency injection and refresh loop
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use fleet_dashboard::application::refresh_service::RefreshService;
use fleet_dashboard::domain::navigation::Navigation;
use fleet_dashboard::infrastructure::config::load_dashboard_config;
use fleet_dashboard::infrastructure::http_api::HttpDashboardApi;
use fleet_dashboard::presentation::bindings::ViewBindings;
use fleet_dashboard::presentation::commands::{run_commands, spawn_presenter, CommandsEnded};
use fleet_dashboard::presentation::surface::MemorySurface;
use fleet_dashboard::presentation::view::DashboardView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_dashboard_config()?;
    let interval = config.refresh.interval()?;

    // Backend client (infrastructure layer)
    let api = Arc::new(HttpDashboardApi::new(
        config.backend.base_url.clone(),
        config.backend.timeout(),
    )?);

    // View controller (presentation layer)
    let bindings = ViewBindings::new(&config.ui.sections);
    let navigation = Navigation::new(config.ui.sections.clone(), &config.ui.initial_section)?;
    let view = DashboardView::new(
        MemorySurface::new(),
        bindings,
        navigation,
        config.refresh.discard_stale,
    );

    // Orchestrator (application layer)
    let service = Arc::new(RefreshService::new(api, Arc::new(Mutex::new(view))));

    tracing::info!(
        backend = %config.backend.base_url,
        interval_secs = interval.as_secs(),
        "Starting fleet dashboard"
    );
    let presenter = spawn_presenter(service.clone());
    let scheduler = service.clone().spawn_scheduler(interval);

    // Closed stdin only ends manual control; polling goes on until Ctrl-C.
    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        ended = run_commands(service.clone(), stdin) => {
            if ended? == CommandsEnded::Closed {
                tracing::info!("Command input closed, polling until Ctrl-C");
                tokio::signal::ctrl_c().await?;
            }
        }
        result = tokio::signal::ctrl_c() => result?,
    }

    tracing::info!("Shutting down");
    scheduler.abort();
    presenter.abort();
    Ok(())
}
