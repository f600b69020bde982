use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecurityIssueError {
    /// A required environment-sourced setting is missing or malformed.
    #[error("{0}")]
    Config(String),

    /// The request itself is incomplete (title/body).
    #[error("{0}")]
    Validation(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("could not create issue: {0}")]
    TrackerCreate(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SecurityIssueError>;
