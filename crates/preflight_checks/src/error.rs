//! Error types for check execution, registration, and selection.

use crate::resource::AccessError;
use preflight_diagnostics::ValidationError;

/// Why a check could not produce a result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckError {
    /// Reading a cluster resource failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The check's own logic failed.
    #[error("{0}")]
    Failed(String),

    /// The check returned a result that violates the result schema.
    #[error("malformed result: {0}")]
    MalformedResult(#[from] ValidationError),

    /// The check panicked.
    #[error("check panicked: {0}")]
    Panicked(String),
}

impl CheckError {
    /// Creates a [`CheckError::Failed`] with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        CheckError::Failed(message.into())
    }
}

/// Errors raised while registering or selecting checks.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    /// A check with the same ID is already registered.
    #[error("duplicate check id '{0}'")]
    DuplicateId(String),

    /// The selection pattern is not a well-formed glob.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// The underlying glob syntax error.
        source: globset::Error,
    },
}

/// Errors returned by the executor's public entry points.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// Resolving the selection failed.
    #[error("check selection failed: {0}")]
    Selection(#[from] RegistryError),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
