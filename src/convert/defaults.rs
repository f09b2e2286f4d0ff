//! Schema-declared default application.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::schema::{ObjectSchema, Schema};

/// Fills missing values from schema-declared defaults before conversion.
///
/// Defaults are always copied into place, never aliased, so a composite
/// default shared by many conversions cannot leak mutations between them.
pub struct DefaultsApplier;

impl DefaultsApplier {
    /// Resolves a missing or null top-level value to the schema's own
    /// default, when one is declared.
    pub fn resolve_value<'a>(value: &'a Value, schema: &'a Schema) -> &'a Value {
        if value.is_null() {
            if let Some(default) = schema.default_value() {
                return default;
            }
        }
        value
    }

    /// Fills each declared property that carries a non-null default and is
    /// absent from the input map.
    ///
    /// Borrows the input untouched when nothing is missing.
    pub fn fill_object_defaults<'a>(
        map: &'a Map<String, Value>,
        schema: &ObjectSchema,
    ) -> Cow<'a, Map<String, Value>> {
        let missing: Vec<(&String, &Value)> = schema
            .properties
            .iter()
            .filter_map(|(name, property)| match property.default_value() {
                Some(default) if !default.is_null() && !map.contains_key(name) => {
                    Some((name, default))
                }
                _ => None,
            })
            .collect();

        if missing.is_empty() {
            return Cow::Borrowed(map);
        }

        let mut filled = map.clone();
        for (name, default) in missing {
            filled.insert(name.clone(), default.clone());
        }
        Cow::Owned(filled)
    }
}
