//! Service entry-point: loads configuration, connects the user store, and
//! serves the HTTP API.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_directory::config::AppSettings;
use user_directory::domain::UserDirectoryService;
use user_directory::inbound::http::health::HealthState;
use user_directory::outbound::persistence::{MongoUserRepository, connect};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("configuration", &err))?;
    let store_config = settings
        .store_config()
        .map_err(|err| startup_error("configuration", &err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("configuration", &err))?;
    let deadline = settings
        .request_timeout()
        .map_err(|err| startup_error("configuration", &err))?;

    let store = connect(&store_config)
        .await
        .map_err(|err| startup_error("user store", &err))?;
    let repository = Arc::new(MongoUserRepository::new(&store));
    let users = Arc::new(UserDirectoryService::new(repository, deadline));

    let health_state = web::Data::new(HealthState::new());
    #[cfg(not(feature = "metrics"))]
    let server_config = ServerConfig::new(bind_addr, users);
    #[cfg(feature = "metrics")]
    let server_config =
        ServerConfig::new(bind_addr, users).with_metrics(Some(server::build_metrics()?));

    let outcome = create_server(health_state.clone(), server_config)?.await;
    health_state.mark_unhealthy();
    outcome
}

fn startup_error(stage: &'static str, err: &impl std::fmt::Display) -> std::io::Error {
    error!(stage, error = %err, "startup failed");
    std::io::Error::other(format!("{stage}: {err}"))
}
