use crate::codec::Codec;
use crate::value::Value;

/// Whether `value` is a tagged codec value. The `Null` codec counts.
#[inline]
pub fn is_tagged_value(value: &Value) -> bool {
    as_tagged(value).is_some()
}

#[inline]
pub fn as_tagged(value: &Value) -> Option<&dyn Codec> {
    match value {
        Value::Codec(codec) => Some(codec.as_ref()),
        _ => None,
    }
}
