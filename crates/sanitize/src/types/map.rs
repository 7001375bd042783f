use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, Variant, VariantKind};
use crate::number::encode_compact_len;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    BTreeMap,
    HashMap,
}

impl MapKind {
    fn name(self) -> &'static str {
        match self {
            MapKind::BTreeMap => "BTreeMap",
            MapKind::HashMap => "HashMap",
        }
    }
}

/// Key-value collection with codec keys and values.
#[derive(Debug, Clone)]
pub struct CodecMap {
    registry: Arc<Registry>,
    kind: MapKind,
    key_type: String,
    value_type: String,
    entries: Vec<(Arc<dyn Codec>, Arc<dyn Codec>)>,
}

impl CodecMap {
    pub fn new(
        registry: &Arc<Registry>,
        kind: MapKind,
        key_type: impl Into<String>,
        value_type: impl Into<String>,
        entries: impl IntoIterator<Item = (Arc<dyn Codec>, Arc<dyn Codec>)>,
    ) -> Self {
        // A repeated key keeps its first position and takes the last value.
        let mut unique: Vec<(Arc<dyn Codec>, Arc<dyn Codec>)> = Vec::new();
        for (key, value) in entries {
            match unique.iter_mut().find(|(k, _)| k.eq_codec(key.as_ref())) {
                Some(slot) => slot.1 = value,
                None => unique.push((key, value)),
            }
        }
        Self {
            registry: registry.clone(),
            kind,
            key_type: key_type.into(),
            value_type: value_type.into(),
            entries: unique,
        }
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &dyn Codec) -> Option<&dyn Codec> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_codec(key))
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for CodecMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Codec for CodecMap {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        let mut out = encode_compact_len(self.entries.len());
        for (k, v) in &self.entries {
            out.extend(k.to_u8a());
            out.extend(v.to_u8a());
        }
        out
    }

    fn to_raw_type(&self) -> String {
        format!("{}<{}, {}>", self.kind.name(), self.key_type, self.value_type)
    }

    /// Keys use their string form; structured keys collapse to text here.
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_json()))
                .collect(),
        )
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::Map => Some(Variant::Map(
                self.entries
                    .iter()
                    .map(|(k, v)| (k.as_ref(), v.as_ref()))
                    .collect(),
            )),
            _ => None,
        }
    }
}
