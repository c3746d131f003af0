use crate::error::{ApiError, ErrorResponse};
use crate::models::{
    AddWordRequest, AddWordResponse, AddWordsRequest, AddWordsResponse, MessageResponse,
    WordsResponse,
};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /words handler - List every stored word in index order
#[utoipa::path(
    get,
    path = routes::WORDS,
    responses(
        (status = 200, description = "Stored words", body = WordsResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "words"
)]
pub async fn list_words_handler(
    State(state): State<AppState>,
) -> Result<Json<WordsResponse>, ApiError> {
    let words = state.words.list().await?;

    tracing::info!("Listed {} words", words.len());
    Ok(Json(WordsResponse {
        count: words.len(),
        words,
    }))
}

/// GET /words/reset handler - Rewind the cursor to the first word
#[utoipa::path(
    get,
    path = routes::WORDS_RESET,
    responses(
        (status = 200, description = "Cursor reset", body = MessageResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "words"
)]
pub async fn reset_words_handler(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.words.reset().await?;

    tracing::info!("Word cursor reset");
    Ok(Json(MessageResponse {
        message: "Word index reset to 0".to_string(),
    }))
}

/// POST /words/add handler - Append one word
#[utoipa::path(
    post,
    path = routes::WORDS_ADD,
    request_body = AddWordRequest,
    responses(
        (status = 201, description = "Word appended", body = AddWordResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "words"
)]
pub async fn add_word_handler(
    State(state): State<AppState>,
    Json(request): Json<AddWordRequest>,
) -> Result<(StatusCode, Json<AddWordResponse>), ApiError> {
    let appended = state.words.add(&request.word).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddWordResponse {
            message: format!("Word '{}' added successfully", request.word),
            index: appended.first_index,
            total_words: appended.total_words,
        }),
    ))
}

/// POST /words/add-multiple handler - Append several words in order
#[utoipa::path(
    post,
    path = routes::WORDS_ADD_MULTIPLE,
    request_body = AddWordsRequest,
    responses(
        (status = 201, description = "Words appended", body = AddWordsResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "words"
)]
pub async fn add_words_handler(
    State(state): State<AppState>,
    Json(request): Json<AddWordsRequest>,
) -> Result<(StatusCode, Json<AddWordsResponse>), ApiError> {
    let appended = state.words.add_multiple(&request.words).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddWordsResponse {
            message: format!("{} words added successfully", appended.count),
            added_words: appended.count,
            total_words: appended.total_words,
        }),
    ))
}
