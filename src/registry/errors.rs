//! Type resolution errors.

use thiserror::Error;

/// Result type for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors raised while resolving a domain type name.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The name matched no binding in any configured space
    #[error("did not find type '{type_name}' in space(s) '{}'", searched.join(", "))]
    TypeNotFound {
        /// The name that was looked up
        type_name: String,
        /// Every space searched, in order
        searched: Vec<String>,
    },
}
