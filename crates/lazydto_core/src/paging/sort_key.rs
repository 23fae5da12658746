//! Attribute lookup and default ordering for reorder keys.
//!
//! An attribute is a field of an element's serde representation. Dotted keys
//! (`owner.name`) walk nested objects. Lookup is case-sensitive.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use std::cmp::Ordering;

static SORT_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^.\s]+(?:\.[^.\s]+)*$").expect("valid sort key regex"));

/// Returns whether `key` is a syntactically valid attribute path.
pub fn is_valid_sort_key(key: &str) -> bool {
    SORT_KEY_RE.is_match(key)
}

/// Resolves a dotted attribute path inside one serialized element.
pub fn resolve_attribute<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    key.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Default ordering for attribute values.
///
/// Values of different kinds order as
/// `null < bool < number < string < array < object`. Numbers compare by
/// value, strings by code point, arrays element-wise. Objects are not ordered
/// among themselves.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| compare_values(x, y))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        _ => kind_rank(left).cmp(&kind_rank(right)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_numbers(left: &Number, right: &Number) -> Ordering {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        return a.cmp(&b);
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}
