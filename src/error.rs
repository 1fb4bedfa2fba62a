use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchClientError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Repository search failed: {0}")]
    SearchFetch(String),

    #[error("Repository detail fetch failed: {0}")]
    DetailFetch(String),

    #[error("Invalid GraphQL endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SearchClientError>;
