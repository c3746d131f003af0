use crate::error::{ApiError, ErrorResponse};
use crate::models::Item;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /data handler - Store a value, overwriting any previous one
#[utoipa::path(
    post,
    path = routes::DATA,
    request_body = Item,
    responses(
        (status = 201, description = "Entry stored", body = Item),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "data"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    Json(item): Json<Item>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    state.store.set(&item.key, &item.value).await?;

    tracing::info!("Stored entry with key: {}", item.key);
    Ok((StatusCode::CREATED, Json(item)))
}
