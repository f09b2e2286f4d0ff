//! Domain-object records.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::registry::TypeBinding;

use super::typed::Typed;

/// An instance of a resolved domain type.
///
/// Instances are records over the binding's declared field layout. They are
/// created bare (no constructor logic runs) and populated by direct field
/// injection, so domain types must not rely on constructor-enforced
/// invariants. Fields never injected read as absent, which dehydration
/// treats as null.
#[derive(Debug, Clone)]
pub struct DomainObject {
    binding: Arc<TypeBinding>,
    fields: BTreeMap<String, Typed>,
}

impl DomainObject {
    pub(crate) fn new(binding: Arc<TypeBinding>) -> Self {
        Self {
            binding,
            fields: BTreeMap::new(),
        }
    }

    /// The binding this instance was constructed from.
    pub fn binding(&self) -> &Arc<TypeBinding> {
        &self.binding
    }

    /// The bound domain type's name.
    pub fn type_name(&self) -> &str {
        self.binding.type_name()
    }

    /// Injects a field value, bypassing any notion of encapsulation.
    ///
    /// Returns `false` when the name is not part of the binding's field
    /// layout; the value is dropped in that case.
    pub fn set(&mut self, name: &str, value: Typed) -> bool {
        if !self.binding.has_field(name) {
            return false;
        }
        self.fields.insert(name.to_string(), value);
        true
    }

    /// Reads a field by direct access.
    ///
    /// `None` means the field was never injected.
    pub fn get(&self, name: &str) -> Option<&Typed> {
        self.fields.get(name)
    }

    /// Iterates the declared field layout with each field's current value,
    /// absent fields included as `None`.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Typed>)> {
        self.binding
            .field_layout()
            .iter()
            .map(|name| (name.as_str(), self.fields.get(name)))
    }
}

impl PartialEq for DomainObject {
    fn eq(&self, other: &Self) -> bool {
        self.binding.type_name() == other.binding.type_name() && self.fields == other.fields
    }
}
