//! View error types

use thiserror::Error;

/// Errors raised while building or rendering views.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Template could not be loaded or compiled
    #[error("template error: {0}")]
    Template(String),

    /// Template failed while producing markup
    #[error("render error: {0}")]
    Render(String),
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
