use serde::{Deserialize, Serialize};

/// A caller-defined key/value pair; request body of POST /data and response of
/// GET /data/{key}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    pub key: String,
    pub value: String,
}

/// Generic confirmation body
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Response type for GET /
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RootResponse {
    pub word: String,
    pub message: String,
    /// `true` when the store was unreachable and the word came from the built-in list
    pub degraded: bool,
}

/// Response type for GET /words
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct WordsResponse {
    pub words: Vec<String>,
    pub count: usize,
}

/// Request body for POST /words/add
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddWordRequest {
    pub word: String,
}

/// Response type for POST /words/add
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddWordResponse {
    pub message: String,
    pub index: u64,
    pub total_words: u64,
}

/// Request body for POST /words/add-multiple
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddWordsRequest {
    pub words: Vec<String>,
}

/// Response type for POST /words/add-multiple
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddWordsResponse {
    pub message: String,
    /// Number of words appended by this request
    pub added_words: u64,
    pub total_words: u64,
}
