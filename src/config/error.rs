use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures reading or validating a run configuration.
///
/// Shape mismatches inside the numeric code are programming errors and
/// panic instead; this type only covers input that comes from outside.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
