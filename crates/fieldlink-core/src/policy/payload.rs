//! Payload bound validation.
//!
//! The payload is a tagged variant tree (object/array/scalar). Bound checking
//! is a depth-first walk that stops the moment a cap is exceeded, so the cost
//! of validating adversarially large input stays bounded.

use serde_json::Value;

use crate::error::{FieldLinkError, Result};

use super::{MAX_PAYLOAD_BYTES, MAX_PAYLOAD_DEPTH, MAX_PAYLOAD_KEYS};

/// Validate a command payload against the structural and size caps.
///
/// `None` is valid and treated as an empty object. The root must be an
/// object; bounds are depth (root's children at depth 1), total object-key
/// count across all levels, and serialized byte size.
pub fn validate_payload(payload: Option<&Value>) -> Result<()> {
    let Some(value) = payload else { return Ok(()) };
    if !value.is_object() {
        return Err(FieldLinkError::BadRequest("payload must be an object".into()));
    }
    let mut keys = 0usize;
    walk(value, 0, &mut keys)?;
    let bytes = serde_json::to_vec(value)
        .map_err(|_| FieldLinkError::PayloadTooLarge("payload serialization failed"))?;
    if bytes.len() > MAX_PAYLOAD_BYTES {
        return Err(FieldLinkError::PayloadTooLarge("payload byte size exceeded"));
    }
    Ok(())
}

fn walk(value: &Value, depth: usize, keys: &mut usize) -> Result<()> {
    if depth > MAX_PAYLOAD_DEPTH {
        return Err(FieldLinkError::PayloadTooLarge("payload nesting too deep"));
    }
    match value {
        Value::Object(map) => {
            for child in map.values() {
                *keys += 1;
                if *keys > MAX_PAYLOAD_KEYS {
                    return Err(FieldLinkError::PayloadTooLarge("payload key count exceeded"));
                }
                walk(child, depth + 1, keys)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, keys)?;
            }
        }
        _ => {}
    }
    Ok(())
}
