pub mod cli;
pub mod config;
pub mod core;
pub mod scraper;
pub mod utils;

// Re-export commonly used types
pub use crate::cli::Cli;
pub use crate::config::PortalConfig;
pub use crate::core::pipeline::{Pipeline, RunOptions, RunOutcome};
pub use crate::utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
