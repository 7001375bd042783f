//! Construction of codec values from JSON literals.

use std::sync::Arc;

use num_bigint::BigInt;
use serde_json::Value as Json;

use super::{MAX_TYPE_DEPTH, Registry, TypeDef};
use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::number::parse_int_literal;
use crate::types::{
    BTreeSetCodec, Bool, Bytes, CodecMap, CodecSet, Compact, Enum, FixedBytes, Int, MapKind, Null,
    OptionCodec, ResultCodec, Sequence, Struct, StructAny, Text,
};
use crate::value::Value;

pub(super) fn build(
    registry: &Arc<Registry>,
    def: &TypeDef,
    literal: &Json,
    depth: usize,
) -> Result<Arc<dyn Codec>> {
    if depth > MAX_TYPE_DEPTH {
        return Err(Error::TypeDef(format!("{def} nests deeper than {MAX_TYPE_DEPTH}")));
    }
    let def = registry.resolve(def)?;
    let type_name = def.to_string();
    let mismatch = |expected: &str| Error::literal(type_name.clone(), format!("expected {expected}, got {literal}"));
    let next = depth + 1;

    let codec: Arc<dyn Codec> = match def {
        TypeDef::Null => match literal {
            Json::Null => Arc::new(Null::new(registry)),
            _ => return Err(mismatch("null")),
        },
        TypeDef::Bool => match literal {
            Json::Bool(b) => Arc::new(Bool::new(registry, *b)),
            _ => return Err(mismatch("a boolean")),
        },
        TypeDef::Text => match literal {
            Json::String(s) => Arc::new(Text::new(registry, s.as_str())),
            _ => return Err(mismatch("a string")),
        },
        TypeDef::Bytes => Arc::new(Bytes::new(registry, bytes_literal(literal, &type_name)?)),
        TypeDef::H256 => Arc::new(FixedBytes::h256(registry, fixed_literal(literal, &type_name)?)),
        TypeDef::AccountId => Arc::new(FixedBytes::account_id(
            registry,
            fixed_literal(literal, &type_name)?,
        )),
        TypeDef::Json => match literal {
            Json::Object(map) => Arc::new(StructAny::new(
                registry,
                map.iter().map(|(k, v)| (k.clone(), Value::from(v.clone()))),
            )),
            _ => return Err(mismatch("an object")),
        },
        TypeDef::Int { .. } => Arc::new(build_int(registry, def, literal)?),
        TypeDef::Compact(inner) => {
            let inner = registry.resolve(inner)?;
            Arc::new(Compact::new(build_int(registry, inner, literal)?)?)
        }
        TypeDef::Option(inner) => match literal {
            Json::Null => Arc::new(OptionCodec::none(registry, inner.to_string())),
            other => Arc::new(OptionCodec::some(registry, build(registry, inner, other, next)?)),
        },
        TypeDef::Result(ok, err) => {
            let (tag, value) = single_entry(literal).ok_or_else(|| mismatch("{\"Ok\": ..} or {\"Err\": ..}"))?;
            match tag {
                "Ok" => Arc::new(ResultCodec::ok(
                    registry,
                    build(registry, ok, value, next)?,
                    err.to_string(),
                )),
                "Err" => Arc::new(ResultCodec::err(
                    registry,
                    ok.to_string(),
                    build(registry, err, value, next)?,
                )),
                _ => return Err(mismatch("an Ok or Err tag")),
            }
        }
        TypeDef::Vec(elem) => {
            let items = build_items(registry, elem, array(literal, &mismatch)?, next)?;
            Arc::new(Sequence::vec(registry, elem.to_string(), items))
        }
        TypeDef::VecFixed(elem, len) => {
            let items = build_items(registry, elem, array(literal, &mismatch)?, next)?;
            Arc::new(Sequence::fixed(registry, elem.to_string(), *len, items)?)
        }
        TypeDef::Tuple(types) => {
            let items = array(literal, &mismatch)?;
            if items.len() != types.len() {
                return Err(mismatch(&format!("{} elements", types.len())));
            }
            let built = types
                .iter()
                .zip(items)
                .map(|(t, v)| build(registry, t, v, next))
                .collect::<Result<Vec<_>>>()?;
            Arc::new(Sequence::tuple(registry, built))
        }
        TypeDef::BTreeSet(elem) => {
            let items = build_items(registry, elem, array(literal, &mismatch)?, next)?;
            Arc::new(BTreeSetCodec::new(registry, elem.to_string(), items))
        }
        TypeDef::BTreeMap(k, v) | TypeDef::HashMap(k, v) => {
            let kind = if matches!(def, TypeDef::BTreeMap(..)) {
                MapKind::BTreeMap
            } else {
                MapKind::HashMap
            };
            let entries = map_entries(registry, k, v, literal, next, &mismatch)?;
            Arc::new(CodecMap::new(registry, kind, k.to_string(), v.to_string(), entries))
        }
        TypeDef::Struct(fields) => {
            let obj = literal.as_object().ok_or_else(|| mismatch("an object"))?;
            if let Some(unknown) = obj.keys().find(|k| !fields.iter().any(|(n, _)| n == *k)) {
                return Err(mismatch(&format!("known fields only, found {unknown:?}")));
            }
            let mut builder = Struct::builder(registry);
            for (name, field_def) in fields {
                builder = match obj.get(name) {
                    Some(v) => builder.field(name, build(registry, field_def, v, next)?),
                    None => builder.absent(name, field_def.to_string()),
                };
            }
            Arc::new(builder.build())
        }
        TypeDef::Enum(variants) => {
            let names = Enum::variants(variants.iter().map(|(n, t)| (n.clone(), t.to_string())));
            match literal {
                Json::String(tag) => Arc::new(Enum::new(registry, names, tag, None)?),
                _ => {
                    let (tag, value) = single_entry(literal)
                        .ok_or_else(|| mismatch("a variant name or a single-key object"))?;
                    let variant_def = variants
                        .iter()
                        .find(|(n, _)| n == tag)
                        .map(|(_, t)| t)
                        .ok_or_else(|| mismatch("a known variant"))?;
                    let inner = build(registry, variant_def, value, next)?;
                    Arc::new(Enum::new(registry, names, tag, Some(inner))?)
                }
            }
        }
        TypeDef::Set(flags) => {
            let names = array(literal, &mismatch)?
                .iter()
                .map(|n| n.as_str().map(str::to_string).ok_or_else(|| mismatch("flag names")))
                .collect::<Result<Vec<_>>>()?;
            let flags: Arc<[(String, u64)]> = flags.clone().into();
            Arc::new(CodecSet::new(registry, flags, names)?)
        }
        TypeDef::Named(name) => return Err(Error::TypeDef(format!("unresolved type {name}"))),
    };
    Ok(codec)
}

fn build_int(registry: &Arc<Registry>, def: &TypeDef, literal: &Json) -> Result<Int> {
    let TypeDef::Int { bits, signed } = def else {
        return Err(Error::TypeDef(format!("Compact<{def}> requires an integer type")));
    };
    let value: Option<BigInt> = match literal {
        Json::Number(n) => n
            .as_u64()
            .map(BigInt::from)
            .or_else(|| n.as_i64().map(BigInt::from)),
        Json::String(s) => parse_int_literal(s),
        _ => None,
    };
    let value = value.ok_or_else(|| {
        Error::literal(def.to_string(), format!("expected an integer, got {literal}"))
    })?;
    Int::new(registry, *bits, *signed, value)
}

fn build_items(
    registry: &Arc<Registry>,
    elem: &TypeDef,
    items: &[Json],
    depth: usize,
) -> Result<Vec<Arc<dyn Codec>>> {
    items
        .iter()
        .map(|v| build(registry, elem, v, depth))
        .collect()
}

fn map_entries(
    registry: &Arc<Registry>,
    key_def: &TypeDef,
    value_def: &TypeDef,
    literal: &Json,
    depth: usize,
    mismatch: &dyn Fn(&str) -> Error,
) -> Result<Vec<(Arc<dyn Codec>, Arc<dyn Codec>)>> {
    match literal {
        Json::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let key = build(registry, key_def, &Json::String(k.clone()), depth)?;
                Ok((key, build(registry, value_def, v, depth)?))
            })
            .collect(),
        // `[[key, value], ..]` allows keys that are not strings
        Json::Array(pairs) => pairs
            .iter()
            .map(|pair| match pair.as_array().map(Vec::as_slice) {
                Some([k, v]) => Ok((
                    build(registry, key_def, k, depth)?,
                    build(registry, value_def, v, depth)?,
                )),
                _ => Err(mismatch("[key, value] pairs")),
            })
            .collect(),
        _ => Err(mismatch("an object or an array of pairs")),
    }
}

fn array<'j>(literal: &'j Json, mismatch: &dyn Fn(&str) -> Error) -> Result<&'j [Json]> {
    literal
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| mismatch("an array"))
}

fn single_entry(literal: &Json) -> Option<(&str, &Json)> {
    let map = literal.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.iter().next().map(|(k, v)| (k.as_str(), v))
}

fn bytes_literal(literal: &Json, type_name: &str) -> Result<Vec<u8>> {
    match literal {
        Json::String(s) => match s.strip_prefix("0x") {
            Some(digits) => hex::decode(digits)
                .map_err(|e| Error::literal(type_name, format!("invalid hex: {e}"))),
            None => Ok(s.as_bytes().to_vec()),
        },
        Json::Array(items) => items
            .iter()
            .map(|b| {
                b.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| Error::literal(type_name, format!("{b} is not a byte")))
            })
            .collect(),
        _ => Err(Error::literal(type_name, format!("expected hex or a byte array, got {literal}"))),
    }
}

fn fixed_literal(literal: &Json, type_name: &str) -> Result<[u8; 32]> {
    let bytes = match literal {
        Json::String(s) if s.starts_with("0x") => bytes_literal(literal, type_name)?,
        _ => return Err(Error::literal(type_name, format!("expected 0x-prefixed hex, got {literal}"))),
    };
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| Error::literal(type_name, format!("expected 32 bytes, got {}", bytes.len())))
}
