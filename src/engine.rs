//! The conversion engine facade.
//!
//! Binds the converter builder, datetime codec, and type resolver behind
//! a two-method API: hydrate wire data into typed values, dehydrate typed
//! values back to wire data. Converters compile lazily on first use of a
//! schema and are reused for the engine's lifetime.

use std::sync::Arc;

use serde_json::Value;

use crate::convert::{ConvertResult, ConverterBuilder, DefaultsApplier, SharedConverter};
use crate::registry::{TypeResolver, TypeSpace};
use crate::schema::SchemaRef;
use crate::temporal::DateTimeCodec;
use crate::value::Typed;

/// Engine construction options.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Strict input pattern for temporal parsing; unset enables the
    /// candidate-list fallback
    pub input_pattern: Option<String>,
    /// Output pattern for temporal formatting; unset keeps RFC 3339 with
    /// microseconds
    pub output_pattern: Option<String>,
    /// Marks the runtime as unable to represent 64-bit integers
    pub force_32bit: bool,
    /// Type spaces searched, in order, when object schemas bind domain
    /// types
    pub spaces: Vec<TypeSpace>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            input_pattern: None,
            output_pattern: None,
            force_32bit: cfg!(target_pointer_width = "32"),
            spaces: Vec::new(),
        }
    }
}

impl EngineOptions {
    /// Adds a type space to the end of the search order.
    pub fn with_space(mut self, space: TypeSpace) -> Self {
        self.spaces.push(space);
        self
    }
}

/// The schema-driven conversion engine.
pub struct Engine {
    builder: ConverterBuilder,
}

impl Engine {
    /// Creates an engine from the given options.
    pub fn new(options: EngineOptions) -> Self {
        let mut codec = DateTimeCodec::new();
        if let Some(pattern) = options.output_pattern {
            codec = codec.with_output_pattern(pattern);
        }
        if let Some(pattern) = options.input_pattern {
            codec = codec.with_input_pattern(pattern);
        }

        let resolver = Arc::new(TypeResolver::new(options.spaces));
        Self {
            builder: ConverterBuilder::new(resolver, Arc::new(codec), options.force_32bit),
        }
    }

    /// Returns the compiled converter for a schema node.
    ///
    /// Useful to pay compilation cost ahead of the first conversion; both
    /// conversion methods go through the same cache.
    pub fn converter(&self, schema: &SchemaRef) -> ConvertResult<SharedConverter> {
        self.builder.build(schema)
    }

    /// Hydrates a wire value against a schema.
    ///
    /// The input is never mutated; a null input falls back to the
    /// schema's own default first.
    pub fn hydrate(&self, value: &Value, schema: &SchemaRef) -> ConvertResult<Typed> {
        let converter = self.builder.build(schema)?;
        let effective = DefaultsApplier::resolve_value(value, schema.as_ref());
        converter.hydrate(effective)
    }

    /// Dehydrates a typed value against a schema.
    ///
    /// The input is never mutated.
    pub fn dehydrate(&self, value: &Typed, schema: &SchemaRef) -> ConvertResult<Value> {
        let converter = self.builder.build(schema)?;
        converter.dehydrate(value)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
