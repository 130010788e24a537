use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chat_core::ForwardErrorBody;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Failures while relaying a request to the webhook.
///
/// Every variant maps to the same generic 500 body; the detail is only
/// ever written to the server log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Inbound body is not valid JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Upstream request failed: {0:#}")]
    Upstream(#[from] anyhow::Error),

    /// reqwest only yields 100..=999; other `WebhookClientTrait` impls may not.
    #[error("Upstream returned an unusable status code: {0}")]
    InvalidUpstreamStatus(u16),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ForwardErrorBody::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_every_variant_hides_detail_behind_generic_body() {
        let errors = [
            AppError::InvalidPayload(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
            AppError::Upstream(anyhow::anyhow!("dns lookup failed for sangam.xendrax.in")),
            AppError::InvalidUpstreamStatus(42),
        ];

        for error in errors {
            let response = error.error_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = to_bytes(response.into_body()).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(
                json,
                serde_json::json!({ "error": "Error forwarding request to n8n" })
            );
        }
    }
}
