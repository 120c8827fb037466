use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Rate limited by data source, please try again later")]
    RateLimited,

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("No match rows available from the data source")]
    NoMatchRows,

    #[error("Run superseded by a newer one before it could publish")]
    StaleRun,
}
