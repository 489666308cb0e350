#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bundle {bundle} failed to load: {reason}")]
    BundleLoad { bundle: String, reason: String },
    #[error("Identity provider error: {0}")]
    Identity(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
