//! Schema-less conversion.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::schema::SchemaRef;
use crate::temporal::DateTimeCodec;
use crate::value::Typed;

use super::errors::ConvertResult;
use super::scalar::cast_number_str;
use super::{float_value, Converter};

/// Converts by runtime value shape alone.
///
/// Numeric-looking strings become numbers, other strings are sniffed as
/// temporal values (falling back to plain strings when parsing fails),
/// and containers recurse element-wise. Every other scalar passes through
/// unchanged.
#[derive(Debug)]
pub struct AnyConverter {
    schema: SchemaRef,
    codec: Arc<DateTimeCodec>,
}

impl AnyConverter {
    pub(crate) fn new(schema: SchemaRef, codec: Arc<DateTimeCodec>) -> Self {
        Self { schema, codec }
    }

    fn hydrate_string(&self, raw: &str) -> Typed {
        if let Some(number) = looks_numeric(raw).then(|| cast_number_str(raw)).flatten() {
            return number;
        }
        match self.codec.deserialize(raw, self.schema.as_ref()) {
            Ok(parsed) => Typed::DateTime(parsed),
            Err(_) => {
                // Soft failure: not a temporal value, keep the string.
                trace!(value = raw, "schema-less value is not temporal, passing through");
                Typed::String(raw.to_string())
            }
        }
    }
}

/// Numeric sniffing for schema-less strings: must parse as a number and
/// carry at least one digit, so "inf" and "nan" stay strings.
fn looks_numeric(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit()) && s.parse::<f64>().is_ok()
}

impl Converter for AnyConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        match value {
            Value::String(raw) => Ok(self.hydrate_string(raw)),
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(Typed::from_wire(value)),
            Value::Array(items) => items
                .iter()
                .map(|item| self.hydrate(item))
                .collect::<ConvertResult<Vec<_>>>()
                .map(Typed::Array),
            Value::Object(map) => {
                let mut output = BTreeMap::new();
                for (name, raw) in map {
                    output.insert(name.clone(), self.hydrate(raw)?);
                }
                Ok(Typed::Map(output))
            }
        }
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        match value {
            Typed::Null => Ok(Value::Null),
            Typed::Bool(b) => Ok(Value::Bool(*b)),
            Typed::Int(i) => Ok(Value::Number((*i).into())),
            Typed::Float(f) => float_value(*f),
            Typed::String(s) => Ok(Value::String(s.clone())),
            Typed::DateTime(dt) => Ok(Value::String(
                self.codec.serialize(dt, self.schema.as_ref()),
            )),
            Typed::Array(items) => items
                .iter()
                .map(|item| self.dehydrate(item))
                .collect::<ConvertResult<Vec<_>>>()
                .map(Value::Array),
            Typed::Map(map) => {
                let mut output = Map::new();
                for (name, field) in map {
                    output.insert(name.clone(), self.dehydrate(field)?);
                }
                Ok(Value::Object(output))
            }
            Typed::Object(object) => {
                // Domain objects flatten to plain maps, absent fields
                // reading as null.
                let mut output = Map::new();
                for (name, field) in object.fields() {
                    output.insert(
                        name.to_string(),
                        self.dehydrate(field.unwrap_or(&Typed::Null))?,
                    );
                }
                Ok(Value::Object(output))
            }
        }
    }
}
