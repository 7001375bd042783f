use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, Variant, VariantKind};
use crate::registry::Registry;

/// `Option<T>`. Also viewable as the enum `None | Some(T)`.
#[derive(Debug, Clone)]
pub struct OptionCodec {
    registry: Arc<Registry>,
    inner_type: String,
    value: Option<Arc<dyn Codec>>,
}

impl OptionCodec {
    pub fn none(registry: &Arc<Registry>, inner_type: impl Into<String>) -> Self {
        Self {
            registry: registry.clone(),
            inner_type: inner_type.into(),
            value: None,
        }
    }

    pub fn some(registry: &Arc<Registry>, value: Arc<dyn Codec>) -> Self {
        Self {
            registry: registry.clone(),
            inner_type: value.to_raw_type(),
            value: Some(value),
        }
    }

    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Option<&dyn Codec> {
        self.value.as_deref()
    }
}

impl fmt::Display for OptionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => fmt::Display::fmt(v, f),
            None => Ok(()),
        }
    }
}

impl Codec for OptionCodec {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        match &self.value {
            Some(v) => {
                let mut out = vec![1u8];
                out.extend(v.to_u8a());
                out
            }
            None => vec![0u8],
        }
    }

    fn to_raw_type(&self) -> String {
        format!("Option<{}>", self.inner_type)
    }

    fn to_json(&self) -> serde_json::Value {
        self.value
            .as_ref()
            .map_or(serde_json::Value::Null, |v| v.to_json())
    }

    fn to_human(&self) -> serde_json::Value {
        self.value
            .as_ref()
            .map_or(serde_json::Value::Null, |v| v.to_human())
    }

    fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::Option => Some(Variant::Option(self.get())),
            VariantKind::Enum => Some(match self.get() {
                Some(v) => Variant::Enum {
                    tag: "Some",
                    value: Some(v),
                },
                None => Variant::Enum {
                    tag: "None",
                    value: None,
                },
            }),
            _ => None,
        }
    }
}

/// `Result<T, E>`, an enum of `Ok(T) | Err(E)`.
#[derive(Debug, Clone)]
pub struct ResultCodec {
    registry: Arc<Registry>,
    ok_type: String,
    err_type: String,
    is_ok: bool,
    value: Arc<dyn Codec>,
}

impl ResultCodec {
    pub fn ok(registry: &Arc<Registry>, value: Arc<dyn Codec>, err_type: impl Into<String>) -> Self {
        Self {
            registry: registry.clone(),
            ok_type: value.to_raw_type(),
            err_type: err_type.into(),
            is_ok: true,
            value,
        }
    }

    pub fn err(registry: &Arc<Registry>, ok_type: impl Into<String>, value: Arc<dyn Codec>) -> Self {
        Self {
            registry: registry.clone(),
            ok_type: ok_type.into(),
            err_type: value.to_raw_type(),
            is_ok: false,
            value,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.is_ok
    }

    fn tag(&self) -> &'static str {
        if self.is_ok { "Ok" } else { "Err" }
    }
}

impl fmt::Display for ResultCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.tag(), self.value)
    }
}

impl Codec for ResultCodec {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        let mut out = vec![if self.is_ok { 0u8 } else { 1u8 }];
        out.extend(self.value.to_u8a());
        out
    }

    fn to_raw_type(&self) -> String {
        format!("Result<{}, {}>", self.ok_type, self.err_type)
    }

    fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(self.tag().to_string(), self.value.to_json());
        serde_json::Value::Object(map)
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::Enum => Some(Variant::Enum {
                tag: self.tag(),
                value: (self.value.to_raw_type() != "Null").then_some(self.value.as_ref()),
            }),
            _ => None,
        }
    }
}
