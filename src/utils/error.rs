use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoodleError {
    #[error("not authenticated: login must succeed before calling web-service functions")]
    Unauthenticated,

    #[error("web-service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing expected field `{field}`")]
    MissingField { field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, MoodleError>;
