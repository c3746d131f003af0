use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub redis: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Body of GET /health, one of the two shapes above
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum HealthStatus {
    Healthy(HealthResponse),
    Unhealthy(UnhealthyResponse),
}

/// Custom error type for API endpoints
///
/// Maps store outcomes to HTTP status codes and formats them as JSON responses.
/// The store's own error text is passed through to the caller unchanged.
#[derive(Debug)]
pub enum ApiError {
    /// Key not found in the store
    KeyNotFound(String),
    /// Store operation error
    StoreError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::KeyNotFound(key) => (
                StatusCode::NOT_FOUND,
                format!("Key not found: {}", key),
            ),
            ApiError::StoreError(err) => {
                tracing::error!("Store error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Store error: {:#}", err),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::StoreError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorResponse {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_key_not_found_is_404() {
        let response = ApiError::KeyNotFound("nope".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await.error, "Key not found: nope");
    }

    #[tokio::test]
    async fn test_store_error_carries_raw_text() {
        let err = anyhow::anyhow!("Connection refused").context("Failed to SET 'k'");
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error = body_of(response).await.error;
        assert!(error.starts_with("Store error: "));
        assert!(error.contains("Failed to SET 'k'"));
        assert!(error.contains("Connection refused"));
    }
}
