use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Some config keys are missing: {}", keys.join(", "))]
    MissingConfig { keys: Vec<String> },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid filename date format: {pattern}")]
    Format { pattern: String },

    #[error("Cannot look back {lookback} months, the limit is {max}")]
    Lookback { lookback: u32, max: u32 },
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
