//! Envelope normalization: extract a list of records from a response that may
//! be a bare array or wrapped under one of several known field names.

use serde_json::Value;

/// Field precedence for user-search responses.
pub(crate) const USER_FIELDS: &[&str] = &["users", "data", "results"];

/// Field precedence for chat responses.
pub(crate) const MESSAGE_FIELDS: &[&str] = &["messages", "data"];

/// Extract an ordered sequence of records from a polymorphic envelope.
///
/// A bare JSON array wins; otherwise the first listed field holding an array
/// is used. Returns `None` when no recognizable array is present.
pub fn extract_records(value: &Value, fields: &[&str]) -> Option<Vec<Value>> {
    if let Some(records) = value.as_array() {
        return Some(records.clone());
    }

    let object = value.as_object()?;
    fields
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_array))
        .cloned()
}
