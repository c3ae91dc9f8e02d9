//! Document helpers
//!
//! Parsing, serialization and id matching for the persisted collection.

use serde_json::{Map, Value};

use super::StoreError;

/// One record of the collection: an arbitrary JSON object.
pub type Document = Map<String, Value>;

/// Parses the raw file contents into a collection.
pub fn parse_collection(raw: &str) -> Result<Vec<Document>, StoreError> {
    serde_json::from_str(raw).map_err(StoreError::Parse)
}

/// Renders the collection the way it is persisted: pretty-printed, 2-space indent.
pub fn to_pretty(docs: &[Document]) -> Result<String, StoreError> {
    serde_json::to_string_pretty(docs).map_err(StoreError::Serialize)
}

/// Renders the collection compactly, as cached after a mutation.
pub fn to_compact(docs: &[Document]) -> Result<String, StoreError> {
    serde_json::to_string(docs).map_err(StoreError::Serialize)
}

// == Id Normalization ==
/// Normalizes a path id the way integer parsing of a leading number does.
///
/// Leading whitespace and a sign are accepted and parsing stops at the first
/// non-digit, so `"12abc"` is 12. Returns None when no digit is present.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Whether the document's `id` is a JSON number equal to `id`.
pub fn has_id(doc: &Document, id: i64) -> bool {
    match doc.get("id") {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => v == id,
            None => n.as_f64() == Some(id as f64),
        },
        _ => false,
    }
}

/// Index of the first document carrying `id`.
pub fn position_of(docs: &[Document], id: i64) -> Option<usize> {
    docs.iter().position(|doc| has_id(doc, id))
}

/// Shallow merge: fields of `patch` replace or extend those of `doc`.
pub fn merge(doc: &mut Document, patch: &Document) {
    for (field, value) in patch {
        doc.insert(field.clone(), value.clone());
    }
}
