use crate::signature::{verify, SIGNATURE_HEADER};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde_json::Value;
use tracing::{error, info, warn};

pub const SECRET_NOT_CONFIGURED: &str = "Segredo do webhook não configurado.";
pub const SIGNATURE_REQUIRED: &str = "Assinatura requirida.";
pub const SIGNATURE_INVALID: &str = "Assinatura inválida.";
pub const PAYLOAD_INVALID: &str = "Payload inválido.";
pub const DEPLOY_FAILED: &str = "Erro ao atualizar o servidor.";
pub const DEPLOY_DONE: &str = "Servidor atualizado.";
pub const NOTHING_TO_DO: &str = "Nenhuma ação necessária.";

/// The pushed ref, when the event is an object with a string `ref`.
fn pushed_ref(event: &Value) -> Option<&str> {
    event.as_object()?.get("ref")?.as_str()
}

/// Verify a signed push event and redeploy when it targets the deploy ref.
///
/// The signature is checked against the body bytes exactly as received.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let Some(secret) = state.config.webhook_secret.as_deref() else {
        error!("Webhook called but WEBHOOK_SECRET is not set");
        return (StatusCode::FORBIDDEN, SECRET_NOT_CONFIGURED);
    };

    let Some(signature) = headers.get(SIGNATURE_HEADER) else {
        warn!("Webhook request without signature");
        return (StatusCode::FORBIDDEN, SIGNATURE_REQUIRED);
    };

    let signature = signature.to_str().unwrap_or("");
    if let Err(err) = verify(secret, &body, signature) {
        warn!("Rejected webhook signature: {}", err);
        return (StatusCode::FORBIDDEN, SIGNATURE_INVALID);
    }

    let event: Value = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!("Webhook payload is not valid JSON: {}", err);
            return (StatusCode::BAD_REQUEST, PAYLOAD_INVALID);
        }
    };

    let git_ref = pushed_ref(&event);
    info!("Webhook received for ref {:?}", git_ref);

    if git_ref != Some(state.config.deploy_ref.as_str()) {
        return (StatusCode::OK, NOTHING_TO_DO);
    }

    match state.deployer.run().await {
        Ok(output) => {
            info!("Server updated: {}", output.stdout.trim_end());
            (StatusCode::OK, DEPLOY_DONE)
        }
        Err(err) => {
            error!("Failed to update the server: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, DEPLOY_FAILED)
        }
    }
}
