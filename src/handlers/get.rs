use crate::error::{ApiError, ErrorResponse};
use crate::models::Item;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /data/{key} handler - Retrieve a stored value
#[utoipa::path(
    get,
    path = routes::DATA_ITEM,
    params(
        ("key" = String, Path, description = "Key of the entry")
    ),
    responses(
        (status = 200, description = "Entry found", body = Item),
        (status = 404, description = "Key not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "data"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    match state.store.get(&key).await? {
        Some(value) => {
            tracing::info!("Retrieved entry with key: {}", key);
            Ok((StatusCode::OK, Json(Item { key, value })))
        }
        None => {
            tracing::info!("Entry not found with key: {}", key);
            Err(ApiError::KeyNotFound(key))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{send, setup_test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_endpoint_success() {
        let (_store, app) = setup_test_app();

        let (status, _) = send(
            &app,
            "POST",
            "/data",
            Some(json!({"key": "colour", "value": "teal"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", "/data/colour", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"key": "colour", "value": "teal"}));
    }

    #[tokio::test]
    async fn test_get_endpoint_not_found() {
        let (_store, app) = setup_test_app();

        let (status, body) = send(&app, "GET", "/data/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Key not found: nope");
    }

    #[tokio::test]
    async fn test_get_endpoint_reads_word_records() {
        // CRUD keys share one namespace with the word list
        let (_store, app) = setup_test_app();
        send(&app, "GET", "/", None).await;

        let (status, body) = send(&app, "GET", "/data/current_word_index", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "1");
    }

    #[tokio::test]
    async fn test_get_endpoint_store_down() {
        let (store, app) = setup_test_app();
        store.set_available(false);

        let (status, body) = send(&app, "GET", "/data/colour", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("Connection refused"));
    }
}
