use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, Variant, VariantKind};
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::types::Null;

/// Variant names paired with the raw type each variant carries.
pub type EnumVariants = Arc<[(String, String)]>;

/// Discriminated union. A variant typed `Null` carries no data.
#[derive(Debug, Clone)]
pub struct Enum {
    registry: Arc<Registry>,
    variants: EnumVariants,
    index: usize,
    value: Arc<dyn Codec>,
}

impl Enum {
    pub fn variants<N, T>(defs: impl IntoIterator<Item = (N, T)>) -> EnumVariants
    where
        N: Into<String>,
        T: Into<String>,
    {
        defs.into_iter()
            .map(|(n, t)| (n.into(), t.into()))
            .collect::<Vec<_>>()
            .into()
    }

    /// Select `tag`. `value` may be omitted for data-less variants.
    pub fn new(
        registry: &Arc<Registry>,
        variants: EnumVariants,
        tag: &str,
        value: Option<Arc<dyn Codec>>,
    ) -> Result<Self> {
        let index = variants
            .iter()
            .position(|(name, _)| name == tag)
            .ok_or_else(|| Error::TypeDef(format!("enum has no variant {tag:?}")))?;
        let carries_data = variants[index].1 != "Null";
        let value = match (value, carries_data) {
            (Some(v), _) => v,
            (None, false) => Arc::new(Null::new(registry)) as Arc<dyn Codec>,
            (None, true) => {
                return Err(Error::TypeDef(format!(
                    "enum variant {tag:?} requires a {} value",
                    variants[index].1
                )));
            }
        };
        Ok(Self {
            registry: registry.clone(),
            variants,
            index,
            value,
        })
    }

    pub fn tag(&self) -> &str {
        &self.variants[self.index].0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> &dyn Codec {
        self.value.as_ref()
    }

    /// True when no variant of the type carries data.
    pub fn is_basic(&self) -> bool {
        self.variants.iter().all(|(_, t)| t == "Null")
    }

    fn carries_data(&self) -> bool {
        self.variants[self.index].1 != "Null"
    }
}

impl fmt::Display for Enum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.carries_data() {
            write!(f, "{}({})", self.tag(), self.value)
        } else {
            f.write_str(self.tag())
        }
    }
}

impl Codec for Enum {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        let mut out = vec![self.index as u8];
        out.extend(self.value.to_u8a());
        out
    }

    fn to_raw_type(&self) -> String {
        let defs: serde_json::Map<String, serde_json::Value> = self
            .variants
            .iter()
            .map(|(n, t)| (n.clone(), serde_json::Value::String(t.clone())))
            .collect();
        serde_json::json!({ "_enum": defs }).to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        if self.is_basic() {
            return serde_json::Value::String(self.tag().to_string());
        }
        let mut map = serde_json::Map::new();
        map.insert(self.tag().to_string(), self.value.to_json());
        serde_json::Value::Object(map)
    }

    fn is_empty(&self) -> bool {
        self.index == 0 && self.value.is_empty()
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::Enum => Some(Variant::Enum {
                tag: self.tag(),
                value: self.carries_data().then_some(self.value.as_ref()),
            }),
            _ => None,
        }
    }
}
