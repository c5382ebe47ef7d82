//! Duplicate removal over lists of records.

use sift_core::{records_from_json, Record, ValidationError, Value};
use std::collections::HashSet;
use tracing::debug;

/// Drop every record equal to an earlier one.
///
/// Records are equal when they have the same keys with the same values;
/// key order does not matter. Survivors keep their relative order.
#[must_use]
pub fn dedupe_records(items: &[Record]) -> Vec<Record> {
    let mut seen: HashSet<&Record> = HashSet::with_capacity(items.len());
    let kept: Vec<Record> = items
        .iter()
        .filter(|record| seen.insert(*record))
        .cloned()
        .collect();

    debug!(
        items = items.len(),
        kept = kept.len(),
        "dedupe_records"
    );
    kept
}

/// Keep the first record for each distinct value at `key`.
///
/// Records without `key` have nothing to compare on and are always kept.
#[must_use]
pub fn dedupe_records_by_key(items: &[Record], key: &str) -> Vec<Record> {
    let mut seen: HashSet<&Value> = HashSet::new();
    let kept: Vec<Record> = items
        .iter()
        .filter(|record| record.get(key).map_or(true, |value| seen.insert(value)))
        .cloned()
        .collect();

    debug!(
        items = items.len(),
        key,
        kept = kept.len(),
        "dedupe_records_by_key"
    );
    kept
}

/// Validate an untyped JSON list of objects and drop duplicate records.
///
/// Fails if `items` is not a list or any element is not an object.
pub fn dedupe_json(items: &serde_json::Value) -> Result<Vec<Record>, ValidationError> {
    let records = records_from_json(items)?;
    Ok(dedupe_records(&records))
}
