//! Error types for label resolution

use crate::binding::BatchError;
use crate::index::IndexError;
use thiserror::Error;

/// Label service errors
///
/// Configuration errors are raised while compiling a service call, before
/// any row is processed. Index errors propagate unchanged from the
/// [`LabelIndex`](crate::index::LabelIndex) adapter. A row for which no
/// language matches is NOT an error - the output variable stays unbound.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Invalid service-call configuration (fatal, detected at compile time)
    #[error("Invalid label service configuration: {0}")]
    Config(String),

    /// Error from the label index adapter
    #[error("Label index error: {0}")]
    Index(#[from] IndexError),

    /// Batch construction error
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for label service operations
pub type Result<T> = std::result::Result<T, ServiceError>;
