//! Variant dispatch for tagged codec values.

use serde_json::Value as Json;

use super::Walker;
use crate::codec::{Codec, Variant, VariantKind};
use crate::error::{Diagnostic, Error, Result};

/// First view `codec` offers, probing in precedence order.
pub(crate) fn select_variant(codec: &dyn Codec) -> Option<Variant<'_>> {
    VariantKind::PRECEDENCE
        .iter()
        .find_map(|kind| codec.variant(*kind))
}

impl Walker<'_> {
    pub(crate) fn tagged(&mut self, codec: &dyn Codec) -> Result<Json> {
        let Some(variant) = select_variant(codec) else {
            // Anything else is assumed not to nest numbers.
            tracing::trace!(raw_type = %codec.to_raw_type(), "using native JSON");
            return Ok(codec.to_json());
        };

        match variant {
            Variant::Option(inner) => match inner {
                Some(v) => self.codec_inner(v),
                None => Ok(Json::Null),
            },
            Variant::Struct(fields) => {
                let mut out = serde_json::Map::with_capacity(fields.len());
                for (name, value) in fields {
                    let Some(value) = value else { continue };
                    self.check_unique(&out, name)?;
                    let v = self.codec_field(name, value)?;
                    out.insert(name.to_string(), v);
                }
                Ok(Json::Object(out))
            }
            Variant::StructAny(fields) => {
                let mut out = serde_json::Map::with_capacity(fields.len());
                for (name, value) in fields {
                    self.check_unique(&out, name)?;
                    let v = self.field(name, value)?;
                    out.insert(name.clone(), v);
                }
                Ok(Json::Object(out))
            }
            Variant::Enum { tag, value } => match value {
                None => Ok(Json::String(tag.to_string())),
                Some(v) => {
                    let inner = self.codec_field(tag, v)?;
                    let mut out = serde_json::Map::with_capacity(1);
                    out.insert(tag.to_string(), inner);
                    Ok(Json::Object(out))
                }
            },
            Variant::BTreeSet(items) | Variant::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (idx, item) in items.into_iter().enumerate() {
                    out.push(self.codec_index(idx, item)?);
                }
                Ok(Json::Array(out))
            }
            Variant::CodecSet(names) => Ok(Json::Array(
                names
                    .into_iter()
                    .map(|s| Json::String(s.to_string()))
                    .collect(),
            )),
            Variant::Map(entries) => {
                let mut out = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = self.map_key(codec, key)?;
                    self.check_unique(&out, &key)?;
                    let v = self.codec_field(&key, value)?;
                    out.insert(key, v);
                }
                Ok(Json::Object(out))
            }
            Variant::Compact(inner) => self.codec_inner(inner),
            Variant::Int(n) => Ok(Json::String(n.to_str_radix(10))),
        }
    }

    /// Sanitize a map key; only strings and numbers can become object keys.
    fn map_key(&mut self, map: &dyn Codec, key: &dyn Codec) -> Result<String> {
        match self.codec_inner(key)? {
            Json::String(s) => Ok(s),
            Json::Number(n) => Ok(n.to_string()),
            other => {
                let path = self.path_string();
                let diagnostic = Diagnostic::new(
                    Diagnostic::KIND_NON_SCALAR_KEY,
                    Some(map.to_raw_type()),
                    other.to_string(),
                );
                diagnostic.emit(&path);
                Err(Error::NonScalarKey { path, diagnostic })
            }
        }
    }
}
