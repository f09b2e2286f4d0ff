//! Conversion error types.

use thiserror::Error;

use crate::registry::ResolveError;
use crate::temporal::DateTimeNotParsable;

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors raised while compiling converters or transforming values.
///
/// All errors surface synchronously to the caller; conversion is
/// deterministic and never retried. The only internal recovery is the
/// schema-less date-parse fallback, which catches [`DateTimeNotParsable`]
/// before it reaches this type.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// A platform or representability limit was hit
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Temporal parsing failed in a schema-driven context
    #[error(transparent)]
    DateTimeNotParsable(#[from] DateTimeNotParsable),

    /// An object schema named a domain type no space declares
    #[error(transparent)]
    TypeNotFound(#[from] ResolveError),

    /// A value's runtime shape cannot satisfy the bound schema
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// What the schema called for
        expected: String,
        /// The runtime type that arrived
        actual: String,
    },
}

impl ConvertError {
    /// Create an unsupported-operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    /// Create a type mismatch error
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
