use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; unset keeps the HTTP client's default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Drop results from a refresh older than the last one applied
    #[serde(default)]
    pub discard_stale: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiSettings {
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    #[serde(default = "default_initial_section")]
    pub initial_section: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_interval_secs() -> u64 {
    300
}

fn default_sections() -> Vec<String> {
    vec!["dashboard".to_string(), "vehicles".to_string(), "point-fs".to_string()]
}

fn default_initial_section() -> String {
    "dashboard".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            discard_stale: false,
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            initial_section: default_initial_section(),
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl RefreshSettings {
    pub fn interval(&self) -> anyhow::Result<Duration> {
        if self.interval_secs == 0 {
            anyhow::bail!("refresh.interval_secs must be greater than zero");
        }
        Ok(Duration::from_secs(self.interval_secs))
    }
}

/// Reads `config/dashboard.toml` (optional) and `FLEET_DASHBOARD__*` overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("FLEET_DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

    deserialize(builder)
}

fn deserialize(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<DashboardConfig> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}

/// Joins the backend base URL and an endpoint path.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
