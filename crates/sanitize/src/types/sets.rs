use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, Variant, VariantKind};
use crate::error::{Error, Result};
use crate::number::encode_compact_len;
use crate::registry::Registry;

/// `BTreeSet<T>`. Elements keep construction order; duplicates are dropped.
#[derive(Debug, Clone)]
pub struct BTreeSetCodec {
    registry: Arc<Registry>,
    elem_type: String,
    items: Vec<Arc<dyn Codec>>,
}

impl BTreeSetCodec {
    pub fn new(
        registry: &Arc<Registry>,
        elem_type: impl Into<String>,
        items: impl IntoIterator<Item = Arc<dyn Codec>>,
    ) -> Self {
        let mut unique: Vec<Arc<dyn Codec>> = Vec::new();
        for item in items {
            if !unique.iter().any(|u| u.eq_codec(item.as_ref())) {
                unique.push(item);
            }
        }
        Self {
            registry: registry.clone(),
            elem_type: elem_type.into(),
            items: unique,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl fmt::Display for BTreeSetCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Codec for BTreeSetCodec {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        let mut out = encode_compact_len(self.items.len());
        for item in &self.items {
            out.extend(item.to_u8a());
        }
        out
    }

    fn to_raw_type(&self) -> String {
        format!("BTreeSet<{}>", self.elem_type)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(|i| i.to_json()).collect())
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::BTreeSet => Some(Variant::BTreeSet(
                self.items.iter().map(|i| i.as_ref()).collect(),
            )),
            _ => None,
        }
    }
}

/// Named flag set, encoded as a little-endian bitmask.
#[derive(Debug, Clone)]
pub struct CodecSet {
    registry: Arc<Registry>,
    flags: Arc<[(String, u64)]>,
    selected: Vec<String>,
}

impl CodecSet {
    pub fn new(
        registry: &Arc<Registry>,
        flags: Arc<[(String, u64)]>,
        selected: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        for name in selected {
            let name = name.into();
            if !flags.iter().any(|(f, _)| *f == name) {
                return Err(Error::literal("Set", format!("unknown flag {name:?}")));
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(Self {
            registry: registry.clone(),
            flags,
            selected: names,
        })
    }

    /// The selected flag names.
    pub fn strings(&self) -> &[String] {
        &self.selected
    }

    fn bitmask(&self) -> u64 {
        self.flags
            .iter()
            .filter(|(name, _)| self.selected.contains(name))
            .fold(0u64, |acc, (_, bit)| acc | bit)
    }

    fn byte_len(&self) -> usize {
        let max = self.flags.iter().map(|(_, b)| *b).max().unwrap_or(0);
        match max {
            0..=0xff => 1,
            0x100..=0xffff => 2,
            0x1_0000..=0xffff_ffff => 4,
            _ => 8,
        }
    }
}

impl fmt::Display for CodecSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.selected.join(", "))
    }
}

impl Codec for CodecSet {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        self.bitmask().to_le_bytes()[..self.byte_len()].to_vec()
    }

    fn to_raw_type(&self) -> String {
        let defs: serde_json::Map<String, serde_json::Value> = self
            .flags
            .iter()
            .map(|(n, b)| (n.clone(), serde_json::Value::from(*b)))
            .collect();
        serde_json::json!({ "_set": defs }).to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.selected
                .iter()
                .map(|s| serde_json::Value::String(s.clone()))
                .collect(),
        )
    }

    fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::CodecSet => Some(Variant::CodecSet(
                self.selected.iter().map(String::as_str).collect(),
            )),
            _ => None,
        }
    }
}
