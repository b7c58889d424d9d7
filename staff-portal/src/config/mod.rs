use serde::Deserialize;
use service_core::error::AppError;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    /// Base URL the `/auth/...` paths are appended to, e.g. `http://localhost:8080/api`.
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Session file for the `file` backend.
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".staff-portal").join("session.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
    /// OTLP collector, e.g. `http://tempo:4317`. Spans are not exported when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Loads settings from `config/` next to the working directory, or from
/// `staff-portal/config/` when run from the workspace root.
pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("Failed to determine the current directory: {}", e))
    })?;

    let configuration_directory = if base_path.join("config").join("base.yaml").exists() {
        base_path.join("config")
    } else {
        base_path.join("staff-portal").join("config")
    };

    get_configuration_from(&configuration_directory)
}

pub fn get_configuration_from(configuration_directory: &Path) -> Result<Settings, AppError> {
    service_core::config::load_layered(configuration_directory)
}
