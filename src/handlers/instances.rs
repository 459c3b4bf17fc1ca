use crate::inventory::{collect, CollectPolicy};
use crate::models::{V1ErrorResponse, V1InstancesResponse};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info};

pub const LIST_ERROR_MESSAGE: &str = "Erro ao buscar instâncias ou domínios.";

pub async fn list_instances(
    State(state): State<AppState>,
) -> Result<Json<V1InstancesResponse>, (StatusCode, Json<V1ErrorResponse>)> {
    let policy = CollectPolicy::from_config(&state.config);

    let data = collect(state.source.as_ref(), &state.mappings, &policy)
        .await
        .map_err(|err| {
            error!("Failed to list instances or domains: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(V1ErrorResponse::new(LIST_ERROR_MESSAGE)),
            )
        })?;

    info!("Served {} instances", data.len());
    Ok(Json(V1InstancesResponse {
        status: "success".to_string(),
        data,
    }))
}
