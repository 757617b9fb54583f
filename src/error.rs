use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown dimension '{0}'. Allowed values are: age, sex, ethnicity")]
    UnknownDimension(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Unknown council '{0}'")]
    UnknownCouncil(String),

    #[error("Unknown preference '{0}'")]
    UnknownPreference(String),

    #[error("Unsupported language '{0}'")]
    UnsupportedLanguage(String),

    #[error("You have already voted on '{0}'")]
    AlreadyVoted(String),

    #[error("Operation timed out after {0} ms")]
    Timeout(u64),

    #[error("Structuring failed: {0}")]
    Structuring(String),
}
