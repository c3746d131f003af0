// Route path constants - single source of truth for all API paths

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

pub const ROOT: &str = "/";
pub const HEALTH: &str = "/health";
pub const DATA: &str = "/data";
pub const DATA_ITEM: &str = "/data/{key}";
pub const WORDS: &str = "/words";
pub const WORDS_RESET: &str = "/words/reset";
pub const WORDS_ADD: &str = "/words/add";
pub const WORDS_ADD_MULTIPLE: &str = "/words/add-multiple";
pub const DOCS: &str = "/docs";
pub const OPENAPI_JSON: &str = "/openapi.json";

/// Build the full application router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ROOT, get(handlers::root_handler))
        .route(HEALTH, get(handlers::health_handler))
        .route(DATA, post(handlers::create_handler))
        .route(
            DATA_ITEM,
            get(handlers::get_handler).delete(handlers::delete_handler),
        )
        .route(WORDS, get(handlers::list_words_handler))
        .route(WORDS_RESET, get(handlers::reset_words_handler))
        .route(WORDS_ADD, post(handlers::add_word_handler))
        .route(WORDS_ADD_MULTIPLE, post(handlers::add_words_handler))
        .with_state(state)
        .merge(SwaggerUi::new(DOCS).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
