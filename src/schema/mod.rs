//! Schema description model.
//!
//! Schemas are the read-only input to the conversion engine: a tagged tree
//! describing the expected shape, type, format, and defaults of a value.
//! This module describes schemas; it does not validate or generate them.
//!
//! # Design Principles
//!
//! - Schemas are immutable once constructed and shared via [`SchemaRef`]
//! - Node identity (the `Arc` allocation), not structural equality, keys
//!   the converter cache
//! - Defaults are stored as wire values and converted on application
//! - Schema trees are acyclic; self-referential schemas are unsupported

mod types;

pub use types::{
    AnySchema, ArraySchema, Format, ObjectSchema, ScalarSchema, ScalarType, Schema, SchemaRef,
};
