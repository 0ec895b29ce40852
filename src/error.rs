use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpdsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown mapping field: {0}")]
    UnknownField(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid catalog request: {0}")]
    InvalidRequest(String),

    #[error("Provider error: {message}")]
    Provider { message: String },
}

pub type Result<T> = std::result::Result<T, OpdsError>;
