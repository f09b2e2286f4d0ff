//! The datetime codec.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

use crate::schema::{Format, Schema};

use super::errors::DateTimeNotParsable;

/// RFC 3339 with microsecond precision, the default output pattern.
pub const RFC3339_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// RFC 3339 with millisecond precision.
const RFC3339_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// RFC 3339 with whole seconds.
const RFC3339_SECS: &str = "%Y-%m-%dT%H:%M:%S%:z";

const DATE_ONLY: &str = "%Y-%m-%d";

/// Parses and formats temporal values against configurable patterns.
///
/// Date-only schemas are special-cased in both directions. For parsing,
/// an explicitly configured input pattern is strict; without one the codec
/// walks an ordered candidate list and the first successful parse wins.
#[derive(Debug, Clone)]
pub struct DateTimeCodec {
    input_pattern: Option<String>,
    output_pattern: String,
}

impl Default for DateTimeCodec {
    fn default() -> Self {
        Self {
            input_pattern: None,
            output_pattern: RFC3339_MICROS.to_string(),
        }
    }
}

impl DateTimeCodec {
    /// Codec with the default output pattern and candidate-list parsing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the output pattern. The override also heads the parse
    /// candidate list.
    pub fn with_output_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.output_pattern = pattern.into();
        self
    }

    /// Configures a strict input pattern; candidate-list parsing is
    /// disabled and mismatches fail.
    pub fn with_input_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.input_pattern = Some(pattern.into());
        self
    }

    /// Formats a temporal value under the given schema.
    ///
    /// Date-formatted schemas emit `YYYY-MM-DD`; anything else, including
    /// schema-less contexts, uses the output pattern.
    pub fn serialize(&self, value: &DateTime<FixedOffset>, schema: &Schema) -> String {
        if schema.has_format(Format::Date) {
            return value.format(DATE_ONLY).to_string();
        }

        value.format(&self.output_pattern).to_string()
    }

    /// Parses a raw string under the given schema.
    ///
    /// # Errors
    ///
    /// Returns [`DateTimeNotParsable`] naming every attempted pattern when
    /// no pattern matches.
    pub fn deserialize(
        &self,
        raw: &str,
        schema: &Schema,
    ) -> Result<DateTime<FixedOffset>, DateTimeNotParsable> {
        if schema.has_format(Format::Date) {
            return self.deserialize_date(raw);
        }

        if let Some(pattern) = &self.input_pattern {
            return DateTime::parse_from_str(raw, pattern)
                .map_err(|_| DateTimeNotParsable::new(raw, vec![pattern.clone()]));
        }

        let mut attempted = Vec::new();
        for pattern in self.candidates() {
            if let Ok(parsed) = DateTime::parse_from_str(raw, pattern) {
                return Ok(parsed);
            }
            attempted.push(pattern.to_string());
        }

        Err(DateTimeNotParsable::new(raw, attempted))
    }

    /// Date-only values parse as local midnight on that date.
    fn deserialize_date(&self, raw: &str) -> Result<DateTime<FixedOffset>, DateTimeNotParsable> {
        let padded = format!("{} 00:00:00", raw);
        let naive = NaiveDateTime::parse_from_str(&padded, "%Y-%m-%d %H:%M:%S")
            .map_err(|_| DateTimeNotParsable::new(raw, vec![DATE_ONLY.to_string()]))?;

        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.fixed_offset())
            .ok_or_else(|| DateTimeNotParsable::new(raw, vec![DATE_ONLY.to_string()]))
    }

    /// Parse candidates in priority order, output pattern first.
    fn candidates(&self) -> impl Iterator<Item = &str> {
        let configured = self.output_pattern.as_str();
        std::iter::once(configured).chain(
            [RFC3339_MICROS, RFC3339_MILLIS, RFC3339_SECS]
                .into_iter()
                .filter(move |p| *p != configured),
        )
    }
}
