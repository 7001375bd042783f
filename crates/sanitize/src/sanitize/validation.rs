//! Canonical JSON predicates over host values.
//!
//! Used as a last check on terminal scalars, never to drive conversion.
//! Codec values are not canonical until they have been through the
//! dispatcher.

use crate::value::{Number, Value};

pub fn is_any_json(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => true,
        Value::Number(n) => is_finite(n),
        Value::Array(items) => is_array_any_json(items),
        Value::Object(entries) => is_object_any_json(entries),
        Value::Set(_) | Value::Codec(_) => false,
    }
}

pub fn is_array_any_json(items: &[Value]) -> bool {
    items.iter().all(is_any_json)
}

pub fn is_object_any_json(entries: &[(String, Value)]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(entries.len());
    entries
        .iter()
        .all(|(k, v)| seen.insert(k.as_str()) && is_any_json(v))
}

fn is_finite(n: &Number) -> bool {
    match n {
        Number::F64(f) => f.is_finite(),
        Number::I64(_) | Number::U64(_) => true,
    }
}
