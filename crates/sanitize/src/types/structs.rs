use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, Variant, VariantKind};
use crate::number::encode_compact_len;
use crate::registry::Registry;
use crate::types::Text;
use crate::value::Value;

#[derive(Debug, Clone)]
struct Field {
    name: Text,
    type_name: String,
    value: Option<Arc<dyn Codec>>,
}

/// Record with a fixed, ordered field set.
///
/// Also viewable as a map from field name to value, which is how generic map
/// consumers see it.
#[derive(Debug, Clone)]
pub struct Struct {
    registry: Arc<Registry>,
    fields: Vec<Field>,
}

pub struct StructBuilder {
    registry: Arc<Registry>,
    fields: Vec<Field>,
}

impl StructBuilder {
    pub fn field(mut self, name: &str, value: Arc<dyn Codec>) -> Self {
        self.fields.push(Field {
            name: Text::new(&self.registry, name),
            type_name: value.to_raw_type(),
            value: Some(value),
        });
        self
    }

    /// Declare a field that has no value.
    pub fn absent(mut self, name: &str, type_name: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: Text::new(&self.registry, name),
            type_name: type_name.into(),
            value: None,
        });
        self
    }

    pub fn build(self) -> Struct {
        Struct {
            registry: self.registry,
            fields: self.fields,
        }
    }
}

impl Struct {
    pub fn builder(registry: &Arc<Registry>) -> StructBuilder {
        StructBuilder {
            registry: registry.clone(),
            fields: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Codec> {
        self.fields
            .iter()
            .find(|f| f.name.as_str() == name)
            .and_then(|f| f.value.as_deref())
    }

    pub fn def_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Codec for Struct {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        self.fields
            .iter()
            .filter_map(|f| f.value.as_ref())
            .flat_map(|v| v.to_u8a())
            .collect()
    }

    fn to_raw_type(&self) -> String {
        let defs: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|f| {
                (
                    f.name.to_string(),
                    serde_json::Value::String(f.type_name.clone()),
                )
            })
            .collect();
        serde_json::Value::Object(defs).to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .filter_map(|f| f.value.as_ref().map(|v| (f.name.to_string(), v.to_json())))
                .collect(),
        )
    }

    fn to_human(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .filter_map(|f| f.value.as_ref().map(|v| (f.name.to_string(), v.to_human())))
                .collect(),
        )
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::Struct => Some(Variant::Struct(
                self.fields
                    .iter()
                    .map(|f| (f.name.as_str(), f.value.as_deref()))
                    .collect(),
            )),
            VariantKind::Map => Some(Variant::Map(
                self.fields
                    .iter()
                    .filter_map(|f| f.value.as_deref().map(|v| (&f.name as &dyn Codec, v)))
                    .collect(),
            )),
            _ => None,
        }
    }
}

/// Record with arbitrary string keys and host values (`Json` type).
#[derive(Debug, Clone)]
pub struct StructAny {
    registry: Arc<Registry>,
    fields: Vec<(String, Value)>,
}

impl StructAny {
    pub fn new<K: Into<String>>(
        registry: &Arc<Registry>,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Self {
            registry: registry.clone(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl fmt::Display for StructAny {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Codec for StructAny {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The JSON text, length-prefixed like `Text`.
    fn to_u8a(&self) -> Vec<u8> {
        let text = self.to_json().to_string();
        let mut out = encode_compact_len(text.len());
        out.extend_from_slice(text.as_bytes());
        out
    }

    fn to_raw_type(&self) -> String {
        "Json".to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_native_json()))
                .collect(),
        )
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::StructAny => Some(Variant::StructAny(&self.fields)),
            _ => None,
        }
    }
}
