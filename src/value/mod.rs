//! Typed value model.
//!
//! [`Typed`] is what hydration produces and dehydration consumes: the
//! typed counterpart of a wire `serde_json::Value`, extended with temporal
//! values and domain-object records.
//!
//! # Design Principles
//!
//! - Values are owned trees; conversion never aliases caller data
//! - Domain objects are records over a resolved field layout, populated by
//!   direct field injection with no constructor logic

mod object;
mod typed;

pub use object::DomainObject;
pub use typed::Typed;
