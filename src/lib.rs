// src/lib.rs

pub mod cli;
pub mod config;
pub mod deploy;
pub mod handlers;
pub mod inventory;
pub mod lightsail;
pub mod locale;
pub mod mappings;
pub mod models;
pub mod retry;
pub mod routes;
pub mod signature;
pub mod state;

use crate::config::Config;
use axum::Router;
use deploy::ShellDeployRunner;
use lightsail::LightsailSource;
use mappings::InstanceMappings;
use routes::create_routes;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Create and return the application state.
pub async fn create_app_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let mappings = InstanceMappings::load(config.mappings_path.as_deref())?;
    info!("Loaded {} instance mappings", mappings.len());

    let source = LightsailSource::from_region(&config.aws_region).await;
    info!("Lightsail client ready for region {}", config.aws_region);

    if config.webhook_secret.is_none() {
        warn!("WEBHOOK_SECRET is not set; webhook requests will be rejected");
    }

    Ok(AppState {
        config: Arc::new(config.clone()),
        source: Arc::new(source),
        deployer: Arc::new(ShellDeployRunner::new(config.deploy_command.clone())),
        mappings: Arc::new(mappings),
    })
}

/// Given the `AppState`, create and return the Axum `Router`.
pub async fn create_app(app_state: AppState) -> Router {
    let routes = create_routes();

    // Any origin, headers, and methods
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes.layer(cors).with_state(app_state)
}
