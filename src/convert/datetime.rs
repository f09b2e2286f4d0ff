//! Temporal scalar conversion.

use std::sync::Arc;

use serde_json::Value;

use crate::schema::{Schema, SchemaRef};
use crate::temporal::DateTimeCodec;
use crate::value::Typed;

use super::errors::{ConvertError, ConvertResult};
use super::{wire_type_name, Converter};

/// Converter for scalar schemas carrying a temporal format.
#[derive(Debug)]
pub struct DateTimeConverter {
    schema: SchemaRef,
    codec: Arc<DateTimeCodec>,
}

impl DateTimeConverter {
    pub(crate) fn new(schema: SchemaRef, codec: Arc<DateTimeCodec>) -> Self {
        Self { schema, codec }
    }

    fn schema(&self) -> &Schema {
        self.schema.as_ref()
    }
}

impl Converter for DateTimeConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        match value {
            Value::String(raw) => Ok(Typed::DateTime(
                self.codec.deserialize(raw, self.schema())?,
            )),
            Value::Null => match self.schema.default_value() {
                Some(Value::String(raw)) => Ok(Typed::DateTime(
                    self.codec.deserialize(raw, self.schema())?,
                )),
                _ => Ok(Typed::Null),
            },
            other => Err(ConvertError::mismatch(
                "temporal string",
                wire_type_name(other),
            )),
        }
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        match value {
            Typed::DateTime(dt) => Ok(Value::String(self.codec.serialize(dt, self.schema()))),
            Typed::Null => Ok(Value::Null),
            other => Err(ConvertError::mismatch("datetime", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Format;
    use serde_json::json;

    fn converter(format: Format) -> DateTimeConverter {
        DateTimeConverter::new(Schema::temporal(format), Arc::new(DateTimeCodec::new()))
    }

    #[test]
    fn test_hydrate_then_dehydrate_round_trips() {
        let conv = converter(Format::DateTime);
        let raw = json!("2016-01-01T12:00:00.000000+01:00");

        let typed = conv.hydrate(&raw).unwrap();
        assert!(matches!(typed, Typed::DateTime(_)));
        assert_eq!(conv.dehydrate(&typed).unwrap(), raw);
    }

    #[test]
    fn test_date_only_serializes_as_date() {
        let conv = converter(Format::Date);
        let typed = conv.hydrate(&json!("2016-03-04")).unwrap();
        assert_eq!(conv.dehydrate(&typed).unwrap(), json!("2016-03-04"));
    }

    #[test]
    fn test_unparsable_value_is_fatal() {
        let conv = converter(Format::DateTime);
        let err = conv.hydrate(&json!("yesterday")).unwrap_err();
        assert!(matches!(err, ConvertError::DateTimeNotParsable(_)));
    }

    #[test]
    fn test_null_without_default_stays_null() {
        let conv = converter(Format::DateTime);
        assert_eq!(conv.hydrate(&Value::Null).unwrap(), Typed::Null);
        assert_eq!(conv.dehydrate(&Typed::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_null_with_default_parses_default() {
        let schema = {
            let mut scalar = crate::schema::ScalarSchema::new(crate::schema::ScalarType::String);
            scalar.format = Some(Format::Date);
            scalar.default = Some(json!("2016-01-01"));
            std::sync::Arc::new(Schema::Scalar(scalar))
        };
        let conv = DateTimeConverter::new(schema, Arc::new(DateTimeCodec::new()));

        let typed = conv.hydrate(&Value::Null).unwrap();
        assert_eq!(conv.dehydrate(&typed).unwrap(), json!("2016-01-01"));
    }

    #[test]
    fn test_non_string_input_is_mismatch() {
        let conv = converter(Format::DateTime);
        assert!(matches!(
            conv.hydrate(&json!(42)),
            Err(ConvertError::TypeMismatch { .. })
        ));
    }
}
