//! Temporal value parsing and formatting.
//!
//! One codec handles both directions of temporal conversion: schema-aware
//! serialization (date-only values emit `YYYY-MM-DD`, everything else uses
//! the configured output pattern) and deserialization against either a
//! strict configured input pattern or an ordered candidate list.

mod codec;
mod errors;

pub use codec::{DateTimeCodec, RFC3339_MICROS};
pub use errors::DateTimeNotParsable;
