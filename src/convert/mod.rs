//! The conversion engine.
//!
//! A [`Converter`] is the compiled, schema-bound unit of transformation:
//! it hydrates one wire value shape into its typed counterpart and
//! dehydrates it back. The [`ConverterBuilder`] walks a schema tree once,
//! selects the matching variant per node, wires child converters
//! recursively, and memoizes the result per schema-node identity.
//!
//! # Design Principles
//!
//! - Converters bind exactly one schema node at construction
//! - Composite converters are mutable only during the build (child slots
//!   filled once), immutable and shareable afterwards
//! - Hydration never mutates the input wire value; dehydration never
//!   mutates the input typed value
//! - Schema-driven conversion fails hard; schema-less conversion degrades
//!   softly (the date-parse fallback)

mod any;
mod array;
mod builder;
mod datetime;
mod defaults;
mod errors;
mod object;
mod scalar;

use std::sync::Arc;

use serde_json::Value;

use crate::value::Typed;

pub use any::AnyConverter;
pub use array::ArrayConverter;
pub use builder::ConverterBuilder;
pub use datetime::DateTimeConverter;
pub use defaults::DefaultsApplier;
pub use errors::{ConvertError, ConvertResult};
pub use object::{LooseObjectConverter, StrictObjectConverter, TypedObjectConverter};
pub use scalar::{
    BoolConverter, IntegerConverter, NullConverter, NumberConverter, StringConverter,
};

/// The unit of schema-bound transformation.
pub trait Converter: Send + Sync + std::fmt::Debug {
    /// Converts a wire value into its typed counterpart.
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed>;

    /// Converts a typed value back into a wire value.
    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value>;
}

/// Shared handle to a compiled converter.
pub type SharedConverter = Arc<dyn Converter>;

/// Returns the wire value's runtime type name for error messages.
pub(crate) fn wire_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Emits a float as a wire number.
///
/// # Errors
///
/// Non-finite floats have no wire representation.
pub(crate) fn float_value(f: f64) -> ConvertResult<Value> {
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| ConvertError::unsupported("non-finite number has no wire representation"))
}
