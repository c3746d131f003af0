use crate::error::{ApiError, ErrorResponse};
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, Json};

/// DELETE /data/{key} handler - Remove a stored value
#[utoipa::path(
    delete,
    path = routes::DATA_ITEM,
    params(
        ("key" = String, Path, description = "Key of the entry")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = MessageResponse),
        (status = 404, description = "Key not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "data"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete(&key).await? {
        tracing::info!("Nothing to delete for key: {}", key);
        return Err(ApiError::KeyNotFound(key));
    }

    tracing::info!("Deleted entry with key: {}", key);
    Ok(Json(MessageResponse {
        message: "Key deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{send, setup_test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_endpoint_success() {
        let (_store, app) = setup_test_app();
        send(&app, "POST", "/data", Some(json!({"key": "k", "value": "v"}))).await;

        let (status, body) = send(&app, "DELETE", "/data/k", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Key deleted successfully");

        let (status, _) = send(&app, "GET", "/data/k", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_endpoint_not_found() {
        let (_store, app) = setup_test_app();

        let (status, body) = send(&app, "DELETE", "/data/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Key not found: nope");
    }
}
