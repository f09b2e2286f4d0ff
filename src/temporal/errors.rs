//! Temporal parsing errors.

use thiserror::Error;

/// A value failed to parse against every attempted pattern.
///
/// Schema-driven conversion treats this as fatal; schema-less conversion
/// catches it and passes the value through as a plain scalar.
#[derive(Debug, Clone, Error)]
#[error("value '{value}' not parsable as a temporal value by pattern(s) '{}'", attempted.join("', '"))]
pub struct DateTimeNotParsable {
    /// The raw input value
    pub value: String,
    /// Every pattern attempted, in order
    pub attempted: Vec<String>,
}

impl DateTimeNotParsable {
    pub(crate) fn new(value: impl Into<String>, attempted: Vec<String>) -> Self {
        Self {
            value: value.into(),
            attempted,
        }
    }
}
