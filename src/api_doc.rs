use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, HealthStatus, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    AddWordRequest, AddWordResponse, AddWordsRequest, AddWordsResponse, Item, MessageResponse,
    RootResponse, WordsResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Redis Web Service",
        version = "1.0.0",
        description = "String key-value storage and a rotating word list backed by Redis"
    ),
    paths(
        handlers::root::root_handler,
        handlers::health::health_handler,
        handlers::get::get_handler,
        handlers::create::create_handler,
        handlers::delete::delete_handler,
        handlers::words::list_words_handler,
        handlers::words::reset_words_handler,
        handlers::words::add_word_handler,
        handlers::words::add_words_handler
    ),
    components(
        schemas(
            Item,
            MessageResponse,
            RootResponse,
            WordsResponse,
            AddWordRequest,
            AddWordResponse,
            AddWordsRequest,
            AddWordsResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse,
            HealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "data", description = "Key-value operations"),
        (name = "words", description = "Rotating word list operations")
    )
)]
pub struct ApiDoc;
