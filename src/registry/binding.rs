//! Constructible domain type bindings.

use std::sync::Arc;

use crate::value::DomainObject;

/// A constructible domain type: a name plus its field layout.
///
/// Only the layout participates in conversion. [`TypeBinding::instantiate`]
/// produces a bare instance with every field absent; the engine injects
/// fields directly afterwards, so no constructor logic ever runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeBinding {
    type_name: String,
    field_layout: Vec<String>,
}

impl TypeBinding {
    /// Declare a binding with the given field layout.
    pub fn new<I, S>(type_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            field_layout: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The bound type's name, as referenced by object schemas.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared fields, in declaration order.
    pub fn field_layout(&self) -> &[String] {
        &self.field_layout
    }

    /// Whether the layout declares the given field.
    pub fn has_field(&self, name: &str) -> bool {
        self.field_layout.iter().any(|f| f == name)
    }

    /// Construct a bare instance of this type.
    pub fn instantiate(self: &Arc<Self>) -> DomainObject {
        DomainObject::new(Arc::clone(self))
    }
}
