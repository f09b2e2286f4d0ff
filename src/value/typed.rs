//! The typed value tree.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use std::collections::BTreeMap;

use super::object::DomainObject;

/// A fully-hydrated value.
///
/// Mirrors the wire value shapes, with two additions the wire side cannot
/// express: parsed temporal values and domain-object records.
#[derive(Debug, Clone, PartialEq)]
pub enum Typed {
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Parsed temporal value
    DateTime(DateTime<FixedOffset>),
    /// Ordered list
    Array(Vec<Typed>),
    /// Keyed structure without a bound domain type
    Map(BTreeMap<String, Typed>),
    /// Instance of a resolved domain type
    Object(DomainObject),
}

impl Typed {
    /// Returns the runtime type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Typed::Null => "null",
            Typed::Bool(_) => "bool",
            Typed::Int(_) => "int",
            Typed::Float(_) => "float",
            Typed::String(_) => "string",
            Typed::DateTime(_) => "datetime",
            Typed::Array(_) => "array",
            Typed::Map(_) => "map",
            Typed::Object(_) => "object",
        }
    }

    /// Whether this value is the explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Typed::Null)
    }

    /// Structural conversion from a wire value, with no schema guidance.
    ///
    /// Numbers keep their integer/float distinction; everything else maps
    /// one-to-one. Used when schema defaults (stored as wire values) enter
    /// the typed domain verbatim.
    pub fn from_wire(value: &Value) -> Typed {
        match value {
            Value::Null => Typed::Null,
            Value::Bool(b) => Typed::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Typed::Int(i),
                None => Typed::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Typed::String(s.clone()),
            Value::Array(items) => Typed::Array(items.iter().map(Typed::from_wire).collect()),
            Value::Object(map) => Typed::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Typed::from_wire(v)))
                    .collect(),
            ),
        }
    }
}
