//! Record normalization: numeric precision and missing values.
//!
//! Every record handed to the resolver passes through here first, so the
//! renderer and layout sizing always see clean 2-decimal numbers and never
//! see nulls.

use crate::models::Record;
use serde_json::{Number, Value};

/// Round to 2 fractional digits, half away from zero.
///
/// This is arithmetic rounding (`f64::round` semantics), not banker's
/// rounding: `round2(0.125) == 0.13` and `round2(-0.125) == -0.13`.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Clean one record: float fields rounded to 2 decimals, null fields
/// coalesced to numeric zero, everything else passed through unchanged.
///
/// Total and pure. A string that merely looks numeric stays a string;
/// integer fields are already exact at 2 decimals and keep their type.
pub fn normalize_record(record: &Record) -> Record {
    record
        .0
        .iter()
        .map(|(name, value)| {
            let cleaned = match value {
                Value::Number(n) if n.is_f64() => {
                    let rounded = round2(n.as_f64().unwrap_or(0.0));
                    Number::from_f64(rounded)
                        .map(Value::Number)
                        // Non-finite floats cannot be re-wrapped; keep the original.
                        .unwrap_or_else(|| value.clone())
                }
                Value::Null => Value::from(0),
                other => other.clone(),
            };
            (name.clone(), cleaned)
        })
        .collect()
}

/// Normalize a whole result set, preserving record order.
pub fn normalize_records(records: &[Record]) -> Vec<Record> {
    records.iter().map(normalize_record).collect()
}
