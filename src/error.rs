use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date format (use YYYY-MM-DD or YYYY-MM-DD HH:MM): {0}")]
    InvalidDate(String),

    #[error("Could not find home directory")]
    NoHomeDirectory,

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, ViewError>;
