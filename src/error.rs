//! Error handling for ByteFlow
//!
//! This module defines the crate-level error type and a Result alias for
//! use outside the pipeline core.

use crate::pipeline::PipelineError;
use thiserror::Error;

/// Main error type for ByteFlow operations
#[derive(Error, Debug)]
pub enum ByteflowError {
    /// Errors from building, loading or running a graph
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ByteflowError>,
    },
}

impl ByteflowError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ByteflowError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for ByteFlow operations
pub type Result<T> = std::result::Result<T, ByteflowError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
