use actix_web::{http::StatusCode, post, web, HttpResponse};
use serde_json::Value;

use crate::{error::AppError, server::AppState};

/// Configure the relay route
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(forward);
}

/// Relay an arbitrary JSON body to the webhook and mirror its answer.
///
/// Any failure along the way (unparsable inbound body, transport error,
/// timeout, non-JSON upstream reply) becomes the generic 500 from `AppError`.
#[post("/proxy")]
pub async fn forward(
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Error in proxy request: {}", e);
        AppError::InvalidPayload(e)
    })?;
    tracing::info!(body = %payload, "Received request");

    let reply = state.webhook_client.forward(&payload).await.map_err(|e| {
        tracing::error!("Error in proxy request: {:#}", e);
        AppError::Upstream(e)
    })?;
    tracing::info!(status = reply.status, body = %reply.body, "Response from webhook");

    let status = StatusCode::from_u16(reply.status).map_err(|_| {
        tracing::error!("Error in proxy request: invalid status {}", reply.status);
        AppError::InvalidUpstreamStatus(reply.status)
    })?;

    Ok(HttpResponse::build(status).json(reply.body))
}
