//! Object conversion.
//!
//! Three variants share the declared-property machinery and differ in how
//! they treat the rest of the world: strict ignores undeclared keys, loose
//! routes them through the schema-less converter, and typed binds the
//! whole object to a resolved domain type.
//!
//! Dehydration omits a declared property whose value is null unless the
//! property schema explicitly allows null. Undeclared keys under a loose
//! object keep their nulls.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};

use crate::registry::TypeBinding;
use crate::schema::ObjectSchema;
use crate::value::Typed;

use super::defaults::DefaultsApplier;
use super::errors::{ConvertError, ConvertResult};
use super::{wire_type_name, Converter, SharedConverter};

static NULL_FIELD: Typed = Typed::Null;

type PropertyConverters = BTreeMap<String, SharedConverter>;

/// Resolves the wire input for an object conversion: objects pass, null
/// falls back to the schema's own default when that default is an object.
fn object_input<'a>(
    value: &'a Value,
    schema: &'a ObjectSchema,
) -> ConvertResult<&'a Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => match &schema.default {
            Some(Value::Object(map)) => Ok(map),
            _ => Err(ConvertError::mismatch("object", "null")),
        },
        other => Err(ConvertError::mismatch("object", wire_type_name(other))),
    }
}

fn allows_null(schema: &ObjectSchema, name: &str) -> bool {
    schema.property(name).map_or(false, |p| p.allows_null())
}

/// Closed-world object conversion: only declared properties exist.
#[derive(Debug)]
pub struct StrictObjectConverter {
    schema: ObjectSchema,
    properties: OnceLock<PropertyConverters>,
}

impl StrictObjectConverter {
    pub(crate) fn new(schema: ObjectSchema) -> Self {
        Self {
            schema,
            properties: OnceLock::new(),
        }
    }

    /// Fills the property slots; part of the two-phase build.
    pub(crate) fn attach_properties(&self, properties: PropertyConverters) {
        let _ = self.properties.set(properties);
    }

    fn children(&self) -> &PropertyConverters {
        // The builder fills the slots before the converter is shared.
        self.properties.get().expect("property converters not attached")
    }
}

impl Converter for StrictObjectConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        let input = object_input(value, &self.schema)?;
        let input = DefaultsApplier::fill_object_defaults(input, &self.schema);

        let mut output = BTreeMap::new();
        for (name, raw) in input.iter() {
            if let Some(converter) = self.children().get(name) {
                output.insert(name.clone(), converter.hydrate(raw)?);
            }
            // Undeclared keys are silently ignored.
        }
        Ok(Typed::Map(output))
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        let map = match value {
            Typed::Map(map) => map,
            other => return Err(ConvertError::mismatch("map", other.type_name())),
        };

        let mut output = Map::new();
        for (name, converter) in self.children() {
            let Some(field) = map.get(name) else { continue };
            if field.is_null() && !allows_null(&self.schema, name) {
                continue;
            }
            output.insert(name.clone(), converter.dehydrate(field)?);
        }
        Ok(Value::Object(output))
    }
}

/// Open-world object conversion: undeclared keys pass through the
/// schema-less converter in both directions.
#[derive(Debug)]
pub struct LooseObjectConverter {
    schema: ObjectSchema,
    overflow: SharedConverter,
    properties: OnceLock<PropertyConverters>,
}

impl LooseObjectConverter {
    pub(crate) fn new(schema: ObjectSchema, overflow: SharedConverter) -> Self {
        Self {
            schema,
            overflow,
            properties: OnceLock::new(),
        }
    }

    /// Fills the property slots; part of the two-phase build.
    pub(crate) fn attach_properties(&self, properties: PropertyConverters) {
        let _ = self.properties.set(properties);
    }

    fn children(&self) -> &PropertyConverters {
        self.properties.get().expect("property converters not attached")
    }
}

impl Converter for LooseObjectConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        let input = object_input(value, &self.schema)?;
        let input = DefaultsApplier::fill_object_defaults(input, &self.schema);

        let mut output = BTreeMap::new();
        for (name, raw) in input.iter() {
            let hydrated = match self.children().get(name) {
                Some(converter) => converter.hydrate(raw)?,
                None => self.overflow.hydrate(raw)?,
            };
            output.insert(name.clone(), hydrated);
        }
        Ok(Typed::Map(output))
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        let map = match value {
            Typed::Map(map) => map,
            other => return Err(ConvertError::mismatch("map", other.type_name())),
        };

        let mut output = Map::new();
        for (name, field) in map {
            match self.children().get(name) {
                Some(converter) => {
                    if field.is_null() && !allows_null(&self.schema, name) {
                        continue;
                    }
                    output.insert(name.clone(), converter.dehydrate(field)?);
                }
                None => {
                    output.insert(name.clone(), self.overflow.dehydrate(field)?);
                }
            }
        }
        Ok(Value::Object(output))
    }
}

/// Object conversion bound to a concrete domain type.
///
/// Hydration constructs a bare instance and injects each field in the
/// binding's layout that also has a declared property schema; dehydration
/// reads every such field back by direct access.
#[derive(Debug)]
pub struct TypedObjectConverter {
    schema: ObjectSchema,
    binding: Arc<TypeBinding>,
    properties: OnceLock<PropertyConverters>,
}

impl TypedObjectConverter {
    pub(crate) fn new(schema: ObjectSchema, binding: Arc<TypeBinding>) -> Self {
        Self {
            schema,
            binding,
            properties: OnceLock::new(),
        }
    }

    /// Fills the property slots; part of the two-phase build.
    pub(crate) fn attach_properties(&self, properties: PropertyConverters) {
        let _ = self.properties.set(properties);
    }

    fn children(&self) -> &PropertyConverters {
        self.properties.get().expect("property converters not attached")
    }
}

impl Converter for TypedObjectConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        let input = object_input(value, &self.schema)?;
        let input = DefaultsApplier::fill_object_defaults(input, &self.schema);

        let mut instance = self.binding.instantiate();
        for field in self.binding.field_layout() {
            let Some(raw) = input.get(field) else { continue };
            if let Some(converter) = self.children().get(field) {
                instance.set(field, converter.hydrate(raw)?);
            }
        }
        Ok(Typed::Object(instance))
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        let object = match value {
            Typed::Object(object) if object.type_name() == self.binding.type_name() => object,
            Typed::Object(object) => {
                return Err(ConvertError::mismatch(
                    self.binding.type_name(),
                    object.type_name().to_string(),
                ))
            }
            other => return Err(ConvertError::mismatch("object", other.type_name())),
        };

        let mut output = Map::new();
        for (name, converter) in self.children() {
            if !self.binding.has_field(name) {
                continue;
            }
            let field = object.get(name).unwrap_or(&NULL_FIELD);
            if field.is_null() && !allows_null(&self.schema, name) {
                continue;
            }
            output.insert(name.clone(), converter.dehydrate(field)?);
        }
        Ok(Value::Object(output))
    }
}
