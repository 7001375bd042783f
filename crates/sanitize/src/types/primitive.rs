use std::fmt;
use std::sync::Arc;

use crate::codec::Codec;
use crate::number::encode_compact_len;
use crate::registry::Registry;

/// The unit codec. Any two `Null`s are equal.
#[derive(Debug, Clone)]
pub struct Null {
    registry: Arc<Registry>,
}

impl Null {
    pub fn new(registry: &Arc<Registry>) -> Self {
        Self {
            registry: registry.clone(),
        }
    }
}

impl fmt::Display for Null {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl Codec for Null {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        Vec::new()
    }

    fn to_raw_type(&self) -> String {
        "Null".to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    fn is_empty(&self) -> bool {
        true
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        other.to_raw_type() == "Null"
    }
}

#[derive(Debug, Clone)]
pub struct Bool {
    registry: Arc<Registry>,
    value: bool,
}

impl Bool {
    pub fn new(registry: &Arc<Registry>, value: bool) -> Self {
        Self {
            registry: registry.clone(),
            value,
        }
    }

    pub fn get(&self) -> bool {
        self.value
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Codec for Bool {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        vec![self.value as u8]
    }

    fn to_raw_type(&self) -> String {
        "bool".to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Bool(self.value)
    }
}

/// UTF-8 string, length-prefixed on the wire.
#[derive(Debug, Clone)]
pub struct Text {
    registry: Arc<Registry>,
    value: String,
}

impl Text {
    pub fn new(registry: &Arc<Registry>, value: impl Into<String>) -> Self {
        Self {
            registry: registry.clone(),
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Codec for Text {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        let mut out = encode_compact_len(self.value.len());
        out.extend_from_slice(self.value.as_bytes());
        out
    }

    fn to_raw_type(&self) -> String {
        "Text".to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.value.clone())
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Variable-length byte blob; JSON is `0x` hex.
#[derive(Debug, Clone)]
pub struct Bytes {
    registry: Arc<Registry>,
    value: Vec<u8>,
}

impl Bytes {
    pub fn new(registry: &Arc<Registry>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            registry: registry.clone(),
            value: value.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.value))
    }
}

impl Codec for Bytes {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        let mut out = encode_compact_len(self.value.len());
        out.extend_from_slice(&self.value);
        out
    }

    fn to_raw_type(&self) -> String {
        "Bytes".to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// 32-byte identifier such as a block hash or an account id.
#[derive(Debug, Clone)]
pub struct FixedBytes {
    registry: Arc<Registry>,
    raw_type: &'static str,
    value: [u8; 32],
}

impl FixedBytes {
    pub fn h256(registry: &Arc<Registry>, value: [u8; 32]) -> Self {
        Self {
            registry: registry.clone(),
            raw_type: "H256",
            value,
        }
    }

    pub fn account_id(registry: &Arc<Registry>, value: [u8; 32]) -> Self {
        Self {
            registry: registry.clone(),
            raw_type: "AccountId",
            value,
        }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.value
    }
}

impl fmt::Display for FixedBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.value))
    }
}

impl Codec for FixedBytes {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        self.value.to_vec()
    }

    fn to_raw_type(&self) -> String {
        self.raw_type.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }
}
