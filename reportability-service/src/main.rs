//! Binary entrypoint: load configuration, bootstrap telemetry, wire the
//! concrete backends, and serve (C10's startup sequence).

use std::sync::Arc;

use reportability_orchestrator::Roster;
use reportability_search::SearchPlugin;
use reportability_service::clients::{AzureChatBackend, AzureSearchBackend};
use reportability_service::config::AppConfig;
use reportability_service::server::{router, AppState};
use reportability_service::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let search_config_path = std::env::var("SEARCH_CONFIG_PATH").unwrap_or_else(|_| "search_config.json".to_string());

    let config = match AppConfig::from_env(&search_config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("fatal: {err}");
            std::process::exit(1);
        }
    };

    telemetry::init(&config.log_level);
    tracing::info!(bind_address = %config.bind_address, "starting reportability-service");

    let http = reqwest::Client::new();
    let chat_backend = Arc::new(AzureChatBackend::new(http.clone(), config.chat_backend.clone()));
    let search_backend = Arc::new(AzureSearchBackend::new(
        http,
        std::env::var("SEARCH_SERVICE_ENDPOINT").unwrap_or_default(),
        std::env::var("SEARCH_SERVICE_API_KEY").unwrap_or_default(),
    ));

    let roster = Arc::new(Roster::new(chat_backend));
    let search = Arc::new(SearchPlugin::new(search_backend));
    let search_config = Arc::new(config.search_config.clone());
    let bind_address = config.bind_address.clone();

    let state = Arc::new(AppState {
        config: Arc::new(config),
        roster,
        search,
        search_config,
    });

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
