use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, Variant, VariantKind};
use crate::error::{Error, Result};
use crate::number::encode_compact_len;
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceKind {
    /// `Vec<T>`, length-prefixed.
    Vec(String),
    /// `[T; N]`, no prefix.
    VecFixed(String),
    /// `(A, B, ..)`, heterogeneous, no prefix.
    Tuple,
    /// Heterogeneous `Vec<Codec>`, length-prefixed.
    VecAny,
}

/// Ordered elements: vectors, fixed arrays and tuples.
#[derive(Debug, Clone)]
pub struct Sequence {
    registry: Arc<Registry>,
    kind: SequenceKind,
    items: Vec<Arc<dyn Codec>>,
}

impl Sequence {
    pub fn vec(
        registry: &Arc<Registry>,
        elem_type: impl Into<String>,
        items: impl IntoIterator<Item = Arc<dyn Codec>>,
    ) -> Self {
        Self::with_kind(registry, SequenceKind::Vec(elem_type.into()), items)
    }

    pub fn fixed(
        registry: &Arc<Registry>,
        elem_type: impl Into<String>,
        len: usize,
        items: impl IntoIterator<Item = Arc<dyn Codec>>,
    ) -> Result<Self> {
        let elem_type = elem_type.into();
        let seq = Self::with_kind(registry, SequenceKind::VecFixed(elem_type.clone()), items);
        if seq.items.len() != len {
            return Err(Error::literal(
                format!("[{elem_type}; {len}]"),
                format!("expected {len} elements, got {}", seq.items.len()),
            ));
        }
        Ok(seq)
    }

    pub fn tuple(registry: &Arc<Registry>, items: impl IntoIterator<Item = Arc<dyn Codec>>) -> Self {
        Self::with_kind(registry, SequenceKind::Tuple, items)
    }

    pub fn any(registry: &Arc<Registry>, items: impl IntoIterator<Item = Arc<dyn Codec>>) -> Self {
        Self::with_kind(registry, SequenceKind::VecAny, items)
    }

    fn with_kind(
        registry: &Arc<Registry>,
        kind: SequenceKind,
        items: impl IntoIterator<Item = Arc<dyn Codec>>,
    ) -> Self {
        Self {
            registry: registry.clone(),
            kind,
            items: items.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> &SequenceKind {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Codec> {
        self.items.iter().map(|i| i.as_ref())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Codec for Sequence {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        let mut out = match self.kind {
            SequenceKind::Vec(_) | SequenceKind::VecAny => encode_compact_len(self.items.len()),
            SequenceKind::VecFixed(_) | SequenceKind::Tuple => Vec::new(),
        };
        for item in &self.items {
            out.extend(item.to_u8a());
        }
        out
    }

    fn to_raw_type(&self) -> String {
        match &self.kind {
            SequenceKind::Vec(t) => format!("Vec<{t}>"),
            SequenceKind::VecFixed(t) => format!("[{t}; {}]", self.items.len()),
            SequenceKind::Tuple => {
                let types: Vec<String> = self.items.iter().map(|i| i.to_raw_type()).collect();
                format!("({})", types.join(", "))
            }
            SequenceKind::VecAny => "Vec<Codec>".to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(|i| i.to_json()).collect())
    }

    fn to_human(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(|i| i.to_human()).collect())
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::Array => Some(Variant::Array(self.iter().collect())),
            _ => None,
        }
    }
}
