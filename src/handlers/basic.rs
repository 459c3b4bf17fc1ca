use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Routes served by this process, listed by the index route.
pub const ENDPOINTS: [&str; 4] = ["GET /", "GET /health", "GET /instances", "POST /webhook"];

#[derive(Debug, Serialize)]
pub struct V1ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V1Health {
    pub status: &'static str,
    pub timestamp: String,
    pub region: String,
    pub mapped_instances: usize,
    /// Whether `/webhook` can accept deliveries at all.
    pub webhook_configured: bool,
}

pub async fn root_handler() -> Json<V1ServiceInfo> {
    Json(V1ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: &ENDPOINTS,
    })
}

/// Liveness plus the settings that decide what the other routes can do.
/// Never calls AWS.
pub async fn health_handler(State(state): State<AppState>) -> Json<V1Health> {
    Json(V1Health {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        region: state.config.aws_region.clone(),
        mapped_instances: state.mappings.len(),
        webhook_configured: state.config.webhook_secret.is_some(),
    })
}
