//! Schema type definitions.
//!
//! Supported node kinds:
//! - any: no constraints, runtime-shape-driven conversion
//! - scalar: string, integer, number, bool, null; optional format hint
//! - array: homogeneous items schema
//! - object: per-property sub-schemas, optional bound domain type,
//!   optional additional-properties marker

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared handle to a schema node.
///
/// The `Arc` allocation is the node's identity: two structurally equal
/// schemas constructed separately are distinct nodes and get distinct
/// compiled converters.
pub type SchemaRef = Arc<Schema>;

/// Scalar primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
    /// Integer or floating point, decided by the value
    Number,
    /// Boolean
    Bool,
    /// Always-null placeholder type
    Null,
}

impl ScalarType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Integer => "integer",
            ScalarType::Number => "number",
            ScalarType::Bool => "bool",
            ScalarType::Null => "null",
        }
    }
}

/// Format hints refining a scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Full timestamp
    DateTime,
}

impl Format {
    /// Whether this format marks a temporal value.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Format::Date | Format::DateTime)
    }
}

/// Schema node without constraints.
///
/// Values under an `any` schema are converted by runtime shape alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnySchema {
    /// Default applied when the value is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Scalar schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarSchema {
    /// Primitive type of the value
    #[serde(rename = "type")]
    pub value_type: ScalarType,
    /// Optional format hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Default applied when the value is missing or null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Whether an explicit null is a legal value
    #[serde(default)]
    pub nullable: bool,
}

impl ScalarSchema {
    /// Create a scalar schema of the given type with no format or default.
    pub fn new(value_type: ScalarType) -> Self {
        Self {
            value_type,
            format: None,
            default: None,
            nullable: false,
        }
    }

    /// Whether this schema describes a temporal value.
    pub fn is_temporal(&self) -> bool {
        self.format.map_or(false, |f| f.is_temporal())
    }

    /// Whether this schema declares the given format.
    pub fn has_format(&self, format: Format) -> bool {
        self.format == Some(format)
    }
}

/// Array schema node with a single items schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySchema {
    /// Schema every element is converted against
    pub items: SchemaRef,
    /// Default applied when the value is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Object schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Declared property schemas by name
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaRef>,
    /// Name of the domain type instances are bound to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_type: Option<String>,
    /// Whether undeclared properties are allowed; unset means allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    /// Default applied when the value is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ObjectSchema {
    /// Create an object schema over the given properties.
    pub fn new(properties: BTreeMap<String, SchemaRef>) -> Self {
        Self {
            properties,
            complex_type: None,
            additional_properties: None,
            default: None,
        }
    }

    /// Returns the declared schema for a property, if any.
    pub fn property(&self, name: &str) -> Option<&SchemaRef> {
        self.properties.get(name)
    }

    /// Whether undeclared properties pass through conversion.
    ///
    /// Only an explicit `false` closes the property set.
    pub fn allows_additional_properties(&self) -> bool {
        self.additional_properties.unwrap_or(true)
    }
}

/// A schema node: the declarative description the engine compiles from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Schema {
    /// No constraints
    Any(AnySchema),
    /// Primitive value
    Scalar(ScalarSchema),
    /// Homogeneous list
    Array(ArraySchema),
    /// Keyed structure
    Object(ObjectSchema),
}

impl Schema {
    /// Returns the node kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Schema::Any(_) => "any",
            Schema::Scalar(_) => "scalar",
            Schema::Array(_) => "array",
            Schema::Object(_) => "object",
        }
    }

    /// Returns the declared default, if any.
    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Schema::Any(s) => s.default.as_ref(),
            Schema::Scalar(s) => s.default.as_ref(),
            Schema::Array(s) => s.default.as_ref(),
            Schema::Object(s) => s.default.as_ref(),
        }
    }

    /// Whether this schema declares the given format.
    pub fn has_format(&self, format: Format) -> bool {
        match self {
            Schema::Scalar(s) => s.has_format(format),
            _ => false,
        }
    }

    /// Whether an explicit null survives dehydration of a declared
    /// property under this schema.
    pub fn allows_null(&self) -> bool {
        match self {
            Schema::Any(_) => true,
            Schema::Scalar(s) => s.nullable || s.value_type == ScalarType::Null,
            _ => false,
        }
    }

    // Convenience constructors, shared by the engine and tests.

    /// An unconstrained schema node.
    pub fn any() -> SchemaRef {
        Arc::new(Schema::Any(AnySchema::default()))
    }

    /// A plain string schema.
    pub fn string() -> SchemaRef {
        Arc::new(Schema::Scalar(ScalarSchema::new(ScalarType::String)))
    }

    /// A plain integer schema.
    pub fn integer() -> SchemaRef {
        Arc::new(Schema::Scalar(ScalarSchema::new(ScalarType::Integer)))
    }

    /// A number schema (integer or float, value-decided).
    pub fn number() -> SchemaRef {
        Arc::new(Schema::Scalar(ScalarSchema::new(ScalarType::Number)))
    }

    /// A boolean schema.
    pub fn bool() -> SchemaRef {
        Arc::new(Schema::Scalar(ScalarSchema::new(ScalarType::Bool)))
    }

    /// An always-null schema.
    pub fn null() -> SchemaRef {
        Arc::new(Schema::Scalar(ScalarSchema::new(ScalarType::Null)))
    }

    /// A string schema carrying a temporal format.
    pub fn temporal(format: Format) -> SchemaRef {
        let mut scalar = ScalarSchema::new(ScalarType::String);
        scalar.format = Some(format);
        Arc::new(Schema::Scalar(scalar))
    }

    /// An array schema over the given items schema.
    pub fn array(items: SchemaRef) -> SchemaRef {
        Arc::new(Schema::Array(ArraySchema {
            items,
            default: None,
        }))
    }

    /// An object schema over the given properties.
    pub fn object(properties: BTreeMap<String, SchemaRef>) -> SchemaRef {
        Arc::new(Schema::Object(ObjectSchema::new(properties)))
    }

    /// An object schema bound to a named domain type.
    pub fn typed_object(
        complex_type: impl Into<String>,
        properties: BTreeMap<String, SchemaRef>,
    ) -> SchemaRef {
        let mut object = ObjectSchema::new(properties);
        object.complex_type = Some(complex_type.into());
        Arc::new(Schema::Object(object))
    }

    /// An object schema with a closed property set.
    pub fn strict_object(properties: BTreeMap<String, SchemaRef>) -> SchemaRef {
        let mut object = ObjectSchema::new(properties);
        object.additional_properties = Some(false);
        Arc::new(Schema::Object(object))
    }
}
