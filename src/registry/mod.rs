//! Domain type resolution.
//!
//! Maps the short type names carried by object schemas to constructible
//! domain types. A [`TypeBinding`] is the constructible unit: a field
//! layout plus bare instantiation. [`TypeSpace`]s group bindings by name,
//! and the [`TypeResolver`] searches an ordered list of spaces, memoizing
//! hits for its own lifetime.
//!
//! # Design Principles
//!
//! - Resolution is first-match over the configured space order
//! - Failures name every searched space
//! - The memo is instance-scoped, never process-wide

mod binding;
mod errors;
mod resolver;

pub use binding::TypeBinding;
pub use errors::{ResolveError, ResolveResult};
pub use resolver::{TypeResolver, TypeSpace};
