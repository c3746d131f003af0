pub mod health;
pub mod root;
pub mod get;
pub mod create;
pub mod delete;
pub mod words;

pub use health::health_handler;
pub use root::root_handler;
pub use get::get_handler;
pub use create::create_handler;
pub use delete::delete_handler;
pub use words::{add_word_handler, add_words_handler, list_words_handler, reset_words_handler};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::routes;
    use crate::state::AppState;
    use crate::store::MemoryStore;
    use axum::{body::Body, http::Request, http::StatusCode, Router};
    use serde_json::Value as JsonValue;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Full router over a fresh in-memory store. The store handle is returned so
    /// tests can inspect it or take it offline.
    pub(crate) fn setup_test_app() -> (MemoryStore, Router) {
        let store = MemoryStore::new();
        let app = routes::router(AppState::new(Arc::new(store.clone())));
        (store, app)
    }

    /// Send one request and decode the JSON response body.
    pub(crate) async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(JsonValue::Null)
        };
        (status, json)
    }
}
