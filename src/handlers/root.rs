use crate::models::RootResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET / handler - Serve the next word of the rotating list
///
/// Always succeeds. When the store cannot be reached the word is drawn from the
/// built-in list and `degraded` is `true`.
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Next word served", body = RootResponse)
    ),
    tag = "words"
)]
pub async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    let served = state.words.next().await;

    let message = if served.degraded {
        "Redis web service is running in fallback mode".to_string()
    } else {
        "Redis web service is running!".to_string()
    };

    tracing::info!(
        "Served word '{}' (index: {:?}, degraded: {})",
        served.word,
        served.index,
        served.degraded
    );

    Json(RootResponse {
        word: served.word,
        message,
        degraded: served.degraded,
    })
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{send, setup_test_app};
    use crate::words::SEED_WORDS;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_root_cycles_through_words() {
        let (_store, app) = setup_test_app();

        let (status, first) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["word"], SEED_WORDS[0]);
        assert_eq!(first["degraded"], false);
        assert_eq!(first["message"], "Redis web service is running!");

        let (_, second) = send(&app, "GET", "/", None).await;
        assert_eq!(second["word"], SEED_WORDS[1]);
    }

    #[tokio::test]
    async fn test_root_degraded_mode_never_fails() {
        let (store, app) = setup_test_app();
        store.set_available(false);

        let (status, body) = send(&app, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["degraded"], true);
        let word = body["word"].as_str().unwrap();
        assert!(SEED_WORDS.contains(&word));
    }
}
