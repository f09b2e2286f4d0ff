//! Schema-to-converter compilation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::registry::TypeResolver;
use crate::schema::{ObjectSchema, ScalarType, Schema, SchemaRef};
use crate::temporal::DateTimeCodec;

use super::any::AnyConverter;
use super::array::ArrayConverter;
use super::datetime::DateTimeConverter;
use super::errors::ConvertResult;
use super::object::{LooseObjectConverter, StrictObjectConverter, TypedObjectConverter};
use super::scalar::{
    BoolConverter, IntegerConverter, NullConverter, NumberConverter, StringConverter,
};
use super::SharedConverter;

/// Compiles schema trees into converter trees, memoized per schema node.
///
/// The cache key is the schema node's identity (its `Arc` allocation):
/// structurally equal but separately constructed nodes compile to separate
/// converters, and re-building the same node returns the same instance.
/// A node's converter enters the cache before its children compile, which
/// is what lets shared sub-schemas reuse one converter per node.
///
/// Concurrent first-time compilation of the same node may build the
/// converter twice; the last insert wins and the duplicates are
/// interchangeable, so no lock is held across recursion.
pub struct ConverterBuilder {
    resolver: Arc<TypeResolver>,
    codec: Arc<DateTimeCodec>,
    force_32bit: bool,
    any_schema: SchemaRef,
    cache: Mutex<HashMap<usize, SharedConverter>>,
}

impl ConverterBuilder {
    /// Creates a builder over the given collaborators.
    ///
    /// `force_32bit` marks the runtime as unable to represent 64-bit
    /// integers, tripping the int64 guard at compile time.
    pub fn new(resolver: Arc<TypeResolver>, codec: Arc<DateTimeCodec>, force_32bit: bool) -> Self {
        Self {
            resolver,
            codec,
            force_32bit,
            any_schema: Schema::any(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Compiles (or returns the memoized) converter for a schema node.
    ///
    /// # Errors
    ///
    /// Fails when an object schema names an unknown domain type or a
    /// scalar schema trips the int64 guard. A failed build leaves no
    /// partial converter behind.
    pub fn build(&self, schema: &SchemaRef) -> ConvertResult<SharedConverter> {
        let key = Arc::as_ptr(schema) as usize;
        if let Some(hit) = self.lookup(key) {
            return Ok(hit);
        }

        trace!(kind = schema.kind_name(), "compiling converter");
        let result = self.compile(schema, key);
        if result.is_err() {
            self.evict(key);
        }
        result
    }

    fn compile(&self, schema: &SchemaRef, key: usize) -> ConvertResult<SharedConverter> {
        match schema.as_ref() {
            Schema::Object(object) => self.compile_object(object, key),
            Schema::Array(array) => {
                let converter = Arc::new(ArrayConverter::new());
                self.insert(key, converter.clone());
                converter.attach_items(self.build(&array.items)?);
                Ok(converter)
            }
            Schema::Scalar(scalar) => {
                let converter: SharedConverter = if scalar.is_temporal() {
                    Arc::new(DateTimeConverter::new(
                        Arc::clone(schema),
                        Arc::clone(&self.codec),
                    ))
                } else {
                    match scalar.value_type {
                        ScalarType::String => Arc::new(StringConverter::new(scalar.clone())),
                        ScalarType::Integer => {
                            Arc::new(IntegerConverter::new(scalar.clone(), self.force_32bit)?)
                        }
                        ScalarType::Number => Arc::new(NumberConverter::new(scalar.clone())),
                        ScalarType::Bool => Arc::new(BoolConverter::new(scalar.clone())),
                        ScalarType::Null => Arc::new(NullConverter::new()),
                    }
                };
                self.insert(key, Arc::clone(&converter));
                Ok(converter)
            }
            Schema::Any(_) => {
                let converter = Arc::new(AnyConverter::new(
                    Arc::clone(schema),
                    Arc::clone(&self.codec),
                ));
                self.insert(key, converter.clone());
                Ok(converter)
            }
        }
    }

    fn compile_object(&self, object: &ObjectSchema, key: usize) -> ConvertResult<SharedConverter> {
        if let Some(type_name) = &object.complex_type {
            let binding = self.resolver.resolve(type_name)?;
            let converter = Arc::new(TypedObjectConverter::new(object.clone(), binding));
            self.insert(key, converter.clone());
            converter.attach_properties(self.compile_properties(object)?);
            Ok(converter)
        } else if object.allows_additional_properties() {
            let overflow = self.build(&self.any_schema)?;
            let converter = Arc::new(LooseObjectConverter::new(object.clone(), overflow));
            self.insert(key, converter.clone());
            converter.attach_properties(self.compile_properties(object)?);
            Ok(converter)
        } else {
            let converter = Arc::new(StrictObjectConverter::new(object.clone()));
            self.insert(key, converter.clone());
            converter.attach_properties(self.compile_properties(object)?);
            Ok(converter)
        }
    }

    fn compile_properties(
        &self,
        object: &ObjectSchema,
    ) -> ConvertResult<BTreeMap<String, SharedConverter>> {
        object
            .properties
            .iter()
            .map(|(name, property)| Ok((name.clone(), self.build(property)?)))
            .collect()
    }

    fn lookup(&self, key: usize) -> Option<SharedConverter> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    fn insert(&self, key: usize, converter: SharedConverter) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, converter);
    }

    fn evict(&self, key: usize) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
    }
}
