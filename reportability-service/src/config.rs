//! Process configuration (C10's startup sequence, spec.md §6): a typed
//! [`AppConfig`] read once from the environment plus the search-index
//! configuration file, or one fatal [`ReportabilityError::ConfigMissing`]
//! if anything required is absent.

use std::path::Path;
use std::str::FromStr;

use reportability_core::error::{ReportabilityError, Result};
use reportability_orchestrator::OrchestrationType;
use reportability_search::SearchConfigList;

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ReportabilityError::ConfigMissing(format!("environment variable '{name}' is not set")))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Connection settings for the chat-completion backend (spec.md §6:
/// "chat/embedding endpoint/deployment/API version/key").
#[derive(Debug, Clone)]
pub struct ChatBackendConfig {
    /// Base endpoint URL.
    pub endpoint: String,
    /// Deployment/model name.
    pub deployment: String,
    /// Provider API version string.
    pub api_version: String,
    /// API key.
    pub api_key: String,
}

/// Process-wide configuration, resolved once at startup and shared
/// read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Orchestration strategy used when a request's `orchestrationType`
    /// query parameter is absent (spec.md §4.7).
    pub default_orchestration_type: OrchestrationType,
    /// How long a signed document URL remains valid.
    pub sas_token_expiration_days: f64,
    /// Minimum level `tracing` emits at (C10).
    pub log_level: String,
    /// Chat-completion backend connection settings.
    pub chat_backend: ChatBackendConfig,
    /// Resolved per-index search configuration.
    pub search_config: SearchConfigList,
    /// Telemetry exporter endpoint, if configured. Absent disables the
    /// OTLP exporter without being a startup failure.
    pub telemetry_endpoint: Option<String>,
}

impl AppConfig {
    /// Load configuration from the environment and the search-index
    /// configuration file at `search_config_path`.
    ///
    /// Fails fast with [`ReportabilityError::ConfigMissing`] on the first
    /// absent required value (C10's startup sequence: a process that
    /// cannot be fully configured does not serve any requests).
    pub fn from_env(search_config_path: impl AsRef<Path>) -> Result<Self> {
        let default_orchestration_type = match std::env::var("ORCHESTRATION_TYPE") {
            Ok(value) => OrchestrationType::from_str(&value).map_err(|()| {
                ReportabilityError::ConfigMissing(format!("ORCHESTRATION_TYPE '{value}' is not one of single, sequential, concurrent"))
            })?,
            Err(_) => OrchestrationType::Concurrent,
        };

        let sas_token_expiration_days = require_env("SAS_TOKEN_EXPIRATIONS_DAYS")?
            .parse::<f64>()
            .map_err(|err| ReportabilityError::ConfigMissing(format!("SAS_TOKEN_EXPIRATIONS_DAYS is not a number: {err}")))?;

        let chat_backend = ChatBackendConfig {
            endpoint: require_env("CHAT_BACKEND_ENDPOINT")?,
            deployment: require_env("CHAT_BACKEND_DEPLOYMENT")?,
            api_version: require_env("CHAT_BACKEND_API_VERSION")?,
            api_key: require_env("CHAT_BACKEND_API_KEY")?,
        };

        let mut search_config = load_search_config(search_config_path.as_ref())?;
        search_config.resolve_from_env()?;

        Ok(Self {
            bind_address: env_or("BIND_ADDRESS", "0.0.0.0:8080"),
            default_orchestration_type,
            sas_token_expiration_days,
            log_level: env_or("LOG_LEVEL", "info"),
            chat_backend,
            search_config,
            telemetry_endpoint: std::env::var("TELEMETRY_EXPORTER_ENDPOINT").ok(),
        })
    }
}

fn load_search_config(path: &Path) -> Result<SearchConfigList> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        ReportabilityError::ConfigMissing(format!("search configuration file '{}' could not be read: {err}", path.display()))
    })?;
    serde_json::from_str(&raw)
        .map_err(|err| ReportabilityError::ConfigMissing(format!("search configuration file '{}' is malformed: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct ScratchFile(PathBuf);

    impl AsRef<Path> for ScratchFile {
        fn as_ref(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for ScratchFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn write_search_config() -> ScratchFile {
        let mut path = std::env::temp_dir();
        path.push(format!("reportability-service-test-{}-{}.json", std::process::id(), line!()));
        std::fs::write(
            &path,
            r#"{"indexes": {"nureg": {"index_name_setting": "TEST_SVC_NUREG_INDEX", "index_name": "", "search_type": "hybrid", "k_nearest_neighbors": 20, "top": 5, "search_fields": ["content"], "select_fields": ["id"], "vector_fields": ["embedding"], "threshold": 0.7}}}"#,
        )
        .unwrap();
        ScratchFile(path)
    }

    #[test]
    fn missing_required_env_var_is_config_missing() {
        std::env::remove_var("SAS_TOKEN_EXPIRATIONS_DAYS");
        let path = write_search_config();
        let err = AppConfig::from_env(&path);
        assert!(matches!(err, Err(ReportabilityError::ConfigMissing(_))));
    }

    #[test]
    fn full_environment_resolves_into_an_app_config() {
        std::env::set_var("TEST_SVC_NUREG_INDEX", "nureg-v1");
        std::env::set_var("SAS_TOKEN_EXPIRATIONS_DAYS", "7");
        std::env::set_var("CHAT_BACKEND_ENDPOINT", "https://example.invalid");
        std::env::set_var("CHAT_BACKEND_DEPLOYMENT", "gpt-4o");
        std::env::set_var("CHAT_BACKEND_API_VERSION", "2024-06-01");
        std::env::set_var("CHAT_BACKEND_API_KEY", "secret");
        let path = write_search_config();

        let config = AppConfig::from_env(&path).unwrap();
        assert_eq!(config.sas_token_expiration_days, 7.0);
        assert_eq!(config.default_orchestration_type, OrchestrationType::Concurrent);
        assert_eq!(config.search_config.get("nureg").unwrap().index_name, "nureg-v1");

        std::env::remove_var("SAS_TOKEN_EXPIRATIONS_DAYS");
        std::env::remove_var("CHAT_BACKEND_ENDPOINT");
        std::env::remove_var("CHAT_BACKEND_DEPLOYMENT");
        std::env::remove_var("CHAT_BACKEND_API_VERSION");
        std::env::remove_var("CHAT_BACKEND_API_KEY");
        std::env::remove_var("TEST_SVC_NUREG_INDEX");
    }
}
