//! Integer coercion for numeric columns.

use crate::types::{CardRecord, FieldValue};

/// Integer value of a cell, or 0 when it is absent, empty or not a number.
pub fn coerce_value(value: Option<&FieldValue>) -> i64 {
    value.and_then(FieldValue::as_int).unwrap_or(0)
}

/// Rewrite each listed column of `record` as an integer, in place.
///
/// Unparseable values become 0 rather than failing. Returns how many fields
/// had to fall back to 0 despite holding a non-empty value.
pub fn coerce_fields(record: &mut CardRecord, fields: &[String]) -> usize {
    let mut defaulted = 0;
    for key in fields {
        let current = record.column(key);
        let coerced = coerce_value(current);
        if coerced == 0 {
            if let Some(original) = current.filter(|v| !v.is_empty() && v.as_int().is_none()) {
                log::debug!(
                    "'{}': {} = {:?} is not a number, using 0",
                    record.name,
                    key,
                    original.to_string()
                );
                defaulted += 1;
            }
        }
        record.set_column(key, FieldValue::Int(coerced));
    }
    defaulted
}

#[cfg(test)]
#[path = "tests/coerce_tests.rs"]
mod tests;
