//! Error types for the checkout binary.
//!
//! ## Error Flow
//! ```text
//! ConfigError ─┐
//! CoreError ───┼──► AppError ──► anyhow (main) ──► stderr, exit code 1
//! cart file ───┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use till_core::CoreError;

use crate::config::ConfigError;

/// Result type alias for app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Everything that can stop a checkout run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The tax engine rejected the calculator set or the cart.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Cart file could not be read.
    #[error("Failed to read cart file {path}: {source}")]
    CartRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cart file is not a valid cart.
    #[error("Invalid cart file {path}: {source}")]
    CartParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Order could not be rendered as JSON.
    #[error("Failed to render receipt: {0}")]
    Render(#[from] serde_json::Error),

    /// Bad command line.
    #[error("{0}\n\nRun with --help for usage.")]
    Usage(String),
}
