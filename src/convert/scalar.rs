//! Scalar converters.
//!
//! One converter per primitive type. Hydration applies the coercion rules
//! below; dehydration is identity for every scalar variant.
//!
//! Null handling is uniform: a null input hydrates to the schema default
//! when one is declared, and to the typed null otherwise. The object
//! converters decide downstream whether a typed null survives dehydration.

use serde_json::Value;

use crate::schema::{Format, ScalarSchema};
use crate::value::Typed;

use super::errors::{ConvertError, ConvertResult};
use super::{wire_type_name, Converter};

/// Casts a numeric-looking string the way the number schema does:
/// digit-only strings become integers, everything else a float.
///
/// Returns `None` when the string does not parse as a number at all.
pub(crate) fn cast_number_str(s: &str) -> Option<Typed> {
    if is_digits(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Some(Typed::Int(i));
        }
        // Digit-only but beyond i64; keep the magnitude as a float.
        return s.parse::<f64>().ok().map(Typed::Float);
    }
    s.parse::<f64>().ok().map(Typed::Float)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Identity dehydration shared by every scalar converter.
fn dehydrate_plain(value: &Typed) -> ConvertResult<Value> {
    match value {
        Typed::Null => Ok(Value::Null),
        Typed::Bool(b) => Ok(Value::Bool(*b)),
        Typed::Int(i) => Ok(Value::Number((*i).into())),
        Typed::Float(f) => super::float_value(*f),
        Typed::String(s) => Ok(Value::String(s.clone())),
        other => Err(ConvertError::mismatch("scalar", other.type_name())),
    }
}

/// Null input resolves to the schema default, structurally converted.
fn hydrate_null(schema: &ScalarSchema) -> Typed {
    schema
        .default
        .as_ref()
        .map(Typed::from_wire)
        .unwrap_or(Typed::Null)
}

/// String scalar conversion.
#[derive(Debug)]
pub struct StringConverter {
    schema: ScalarSchema,
}

impl StringConverter {
    pub(crate) fn new(schema: ScalarSchema) -> Self {
        Self { schema }
    }
}

impl Converter for StringConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        match value {
            Value::Null => Ok(hydrate_null(&self.schema)),
            Value::String(s) => Ok(Typed::String(s.clone())),
            Value::Number(n) => Ok(Typed::String(n.to_string())),
            Value::Bool(b) => Ok(Typed::String(b.to_string())),
            other => Err(ConvertError::mismatch("string", wire_type_name(other))),
        }
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        dehydrate_plain(value)
    }
}

/// Integer scalar conversion.
///
/// Construction enforces the 64-bit guard; hydration range-checks every
/// non-integer source before truncating.
#[derive(Debug)]
pub struct IntegerConverter {
    schema: ScalarSchema,
}

impl IntegerConverter {
    pub(crate) fn new(schema: ScalarSchema, force_32bit: bool) -> ConvertResult<Self> {
        if force_32bit && schema.has_format(Format::Int64) {
            return Err(ConvertError::unsupported(
                "runtime does not support 64 bit integers",
            ));
        }
        Ok(Self { schema })
    }

    fn from_float(&self, f: f64) -> ConvertResult<Typed> {
        // i64::MAX is not exactly representable; 2^63 is, and anything at
        // or beyond it overflows.
        if !f.is_finite() || f >= (i64::MAX as f64) || f < (i64::MIN as f64) {
            return Err(ConvertError::unsupported(format!(
                "value {} exceeds the representable integer range",
                f
            )));
        }
        Ok(Typed::Int(f.trunc() as i64))
    }
}

impl Converter for IntegerConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        match value {
            Value::Null => Ok(hydrate_null(&self.schema)),
            Value::Bool(b) => Ok(Typed::Int(i64::from(*b))),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Typed::Int(i)),
                None => match n.as_f64() {
                    Some(f) => self.from_float(f),
                    None => Err(ConvertError::unsupported(format!(
                        "value {} exceeds the representable integer range",
                        n
                    ))),
                },
            },
            Value::String(s) => {
                if let Ok(i) = s.parse::<i64>() {
                    return Ok(Typed::Int(i));
                }
                match s.parse::<f64>() {
                    Ok(f) => self.from_float(f),
                    Err(_) => Err(ConvertError::mismatch("integer", wire_type_name(value))),
                }
            }
            other => Err(ConvertError::mismatch("integer", wire_type_name(other))),
        }
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        dehydrate_plain(value)
    }
}

/// Number scalar conversion: integers stay integers, floats stay floats,
/// and strings are cast by [`cast_number_str`].
#[derive(Debug)]
pub struct NumberConverter {
    schema: ScalarSchema,
}

impl NumberConverter {
    pub(crate) fn new(schema: ScalarSchema) -> Self {
        Self { schema }
    }
}

impl Converter for NumberConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        match value {
            Value::Null => Ok(hydrate_null(&self.schema)),
            Value::Number(_) => Ok(Typed::from_wire(value)),
            Value::String(s) => cast_number_str(s)
                .ok_or_else(|| ConvertError::mismatch("number", wire_type_name(value))),
            other => Err(ConvertError::mismatch("number", wire_type_name(other))),
        }
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        dehydrate_plain(value)
    }
}

/// Boolean scalar conversion with conventional truthiness: the empty
/// string and `"0"` are false, numeric zero is false, everything else
/// coerces true.
#[derive(Debug)]
pub struct BoolConverter {
    schema: ScalarSchema,
}

impl BoolConverter {
    pub(crate) fn new(schema: ScalarSchema) -> Self {
        Self { schema }
    }
}

impl Converter for BoolConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        match value {
            Value::Null => Ok(hydrate_null(&self.schema)),
            Value::Bool(b) => Ok(Typed::Bool(*b)),
            Value::String(s) => Ok(Typed::Bool(!s.is_empty() && s != "0")),
            Value::Number(n) => Ok(Typed::Bool(n.as_f64() != Some(0.0))),
            other => Err(ConvertError::mismatch("bool", wire_type_name(other))),
        }
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        dehydrate_plain(value)
    }
}

/// Null scalar conversion: hydration discards the input entirely.
#[derive(Debug)]
pub struct NullConverter;

impl NullConverter {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl Converter for NullConverter {
    fn hydrate(&self, _value: &Value) -> ConvertResult<Typed> {
        Ok(Typed::Null)
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        dehydrate_plain(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ScalarType;
    use serde_json::json;

    fn scalar(value_type: ScalarType) -> ScalarSchema {
        ScalarSchema::new(value_type)
    }

    #[test]
    fn test_string_casts() {
        let conv = StringConverter::new(scalar(ScalarType::String));
        assert_eq!(conv.hydrate(&json!("a")).unwrap(), Typed::String("a".into()));
        assert_eq!(conv.hydrate(&json!(1)).unwrap(), Typed::String("1".into()));
        assert_eq!(
            conv.hydrate(&json!(true)).unwrap(),
            Typed::String("true".into())
        );
        assert!(conv.hydrate(&json!([])).is_err());
    }

    #[test]
    fn test_string_null_yields_default() {
        let mut schema = scalar(ScalarType::String);
        schema.default = Some(json!("fallback"));
        let conv = StringConverter::new(schema);
        assert_eq!(
            conv.hydrate(&Value::Null).unwrap(),
            Typed::String("fallback".into())
        );

        let conv = StringConverter::new(scalar(ScalarType::String));
        assert_eq!(conv.hydrate(&Value::Null).unwrap(), Typed::Null);
    }

    #[test]
    fn test_integer_casts_and_truncates() {
        let conv = IntegerConverter::new(scalar(ScalarType::Integer), false).unwrap();
        assert_eq!(conv.hydrate(&json!(7)).unwrap(), Typed::Int(7));
        assert_eq!(conv.hydrate(&json!("1")).unwrap(), Typed::Int(1));
        assert_eq!(conv.hydrate(&json!("1.0")).unwrap(), Typed::Int(1));
        assert_eq!(conv.hydrate(&json!(2.9)).unwrap(), Typed::Int(2));
        assert_eq!(conv.hydrate(&json!(true)).unwrap(), Typed::Int(1));
    }

    #[test]
    fn test_integer_null_yields_default() {
        let mut schema = scalar(ScalarType::Integer);
        schema.default = Some(json!(-1));
        let conv = IntegerConverter::new(schema, false).unwrap();
        assert_eq!(conv.hydrate(&Value::Null).unwrap(), Typed::Int(-1));
    }

    #[test]
    fn test_integer_overflow_fails() {
        let conv = IntegerConverter::new(scalar(ScalarType::Integer), false).unwrap();

        let too_large = format!("{}1", i64::MAX);
        let err = conv.hydrate(&json!(too_large)).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedOperation(_)));

        let err = conv.hydrate(&json!((i64::MAX as f64) * 2.0)).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedOperation(_)));
    }

    #[test]
    fn test_integer_rejects_non_numeric_strings() {
        let conv = IntegerConverter::new(scalar(ScalarType::Integer), false).unwrap();
        assert!(matches!(
            conv.hydrate(&json!("abc")),
            Err(ConvertError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_int64_guard_on_32bit_runtime() {
        let mut schema = scalar(ScalarType::Integer);
        schema.format = Some(Format::Int64);

        let err = IntegerConverter::new(schema.clone(), true).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedOperation(_)));

        assert!(IntegerConverter::new(schema, false).is_ok());
    }

    #[test]
    fn test_number_keeps_value_kinds() {
        let conv = NumberConverter::new(scalar(ScalarType::Number));
        assert_eq!(conv.hydrate(&json!("2")).unwrap(), Typed::Int(2));
        assert_eq!(conv.hydrate(&json!("2.0")).unwrap(), Typed::Float(2.0));
        assert_eq!(conv.hydrate(&json!("1.0")).unwrap(), Typed::Float(1.0));
        assert_eq!(conv.hydrate(&json!(2)).unwrap(), Typed::Int(2));
        assert_eq!(conv.hydrate(&json!(1.0)).unwrap(), Typed::Float(1.0));
    }

    #[test]
    fn test_number_negative_strings_become_floats() {
        // Only digit-only strings hydrate as integers.
        let conv = NumberConverter::new(scalar(ScalarType::Number));
        assert_eq!(conv.hydrate(&json!("-1")).unwrap(), Typed::Float(-1.0));
    }

    #[test]
    fn test_bool_truthiness() {
        let conv = BoolConverter::new(scalar(ScalarType::Bool));
        for (input, expected) in [
            (json!("1.0"), true),
            (json!("2"), true),
            (json!(1.0), true),
            (json!(2), true),
            (json!(true), true),
            (json!(false), false),
            (json!(""), false),
            (json!("0"), false),
            (json!(0), false),
            (json!(0.0), false),
        ] {
            assert_eq!(
                conv.hydrate(&input).unwrap(),
                Typed::Bool(expected),
                "failed for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_null_converter_discards_input() {
        let conv = NullConverter::new();
        assert_eq!(conv.hydrate(&json!("anything")).unwrap(), Typed::Null);
        assert_eq!(conv.hydrate(&json!(42)).unwrap(), Typed::Null);
    }

    #[test]
    fn test_dehydrate_is_identity() {
        let conv = NumberConverter::new(scalar(ScalarType::Number));
        assert_eq!(conv.dehydrate(&Typed::Int(2)).unwrap(), json!(2));
        assert_eq!(conv.dehydrate(&Typed::Float(2.5)).unwrap(), json!(2.5));
        assert_eq!(conv.dehydrate(&Typed::Null).unwrap(), Value::Null);
        assert_eq!(
            conv.dehydrate(&Typed::String("x".into())).unwrap(),
            json!("x")
        );
    }
}
