use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Event channel closed")]
    ChannelClosed,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<waypost_api::ApiError> for ShellError {
    fn from(err: waypost_api::ApiError) -> Self {
        match err {
            waypost_api::ApiError::Identity(msg) => ShellError::Auth(msg),
            other => ShellError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
