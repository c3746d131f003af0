use crate::error::{HealthResponse, HealthStatus, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /health handler - Health check endpoint
///
/// Sends PING to the store. Both outcomes are reported with 200 OK; the body's
/// `status` field says whether the store answered.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Store status, either HealthResponse or UnhealthyResponse", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    match state.store.ping().await {
        Ok(()) => {
            tracing::debug!("Health check passed");
            Json(HealthStatus::Healthy(HealthResponse {
                status: "healthy".to_string(),
                redis: "connected".to_string(),
            }))
        }
        Err(e) => {
            tracing::error!("Health check failed: {:#}", e);
            Json(HealthStatus::Unhealthy(UnhealthyResponse {
                status: "unhealthy".to_string(),
                error: format!("{:#}", e),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{send, setup_test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let (_store, app) = setup_test_app();

        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["redis"], "connected");
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let (store, app) = setup_test_app();
        store.set_available(false);

        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "unhealthy");
        assert!(body["error"].as_str().unwrap().contains("Connection refused"));
    }
}
