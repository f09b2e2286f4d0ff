//! Array conversion.

use std::sync::OnceLock;

use serde_json::Value;

use crate::value::Typed;

use super::errors::{ConvertError, ConvertResult};
use super::{wire_type_name, Converter, SharedConverter};

/// Maps every element through a single items converter, preserving order
/// and length.
#[derive(Debug)]
pub struct ArrayConverter {
    items: OnceLock<SharedConverter>,
}

impl ArrayConverter {
    pub(crate) fn new() -> Self {
        Self {
            items: OnceLock::new(),
        }
    }

    /// Fills the items slot; part of the two-phase build.
    pub(crate) fn attach_items(&self, items: SharedConverter) {
        let _ = self.items.set(items);
    }

    fn items(&self) -> &SharedConverter {
        // The builder fills the slot before the converter is shared.
        self.items.get().expect("items converter not attached")
    }
}

impl Converter for ArrayConverter {
    fn hydrate(&self, value: &Value) -> ConvertResult<Typed> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(ConvertError::mismatch("array", wire_type_name(other))),
        };

        items
            .iter()
            .map(|item| self.items().hydrate(item))
            .collect::<ConvertResult<Vec<_>>>()
            .map(Typed::Array)
    }

    fn dehydrate(&self, value: &Typed) -> ConvertResult<Value> {
        let items = match value {
            Typed::Array(items) => items,
            other => return Err(ConvertError::mismatch("array", other.type_name())),
        };

        items
            .iter()
            .map(|item| self.items().dehydrate(item))
            .collect::<ConvertResult<Vec<_>>>()
            .map(Value::Array)
    }
}
