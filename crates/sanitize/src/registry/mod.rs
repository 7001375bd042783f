//! Type registry: named type definitions and construction of codec values
//! from JSON literals.
//!
//! Definitions use the JSON shapes of the metadata layer:
//! - `"u128"`, `"Vec<AccountId>"`: a type string (alias)
//! - `{"free": "Balance", "reserved": "Balance"}`: a struct
//! - `{"_enum": ["A", "B"]}` or `{"_enum": {"A": "Null", "B": "u32"}}`: an enum
//! - `{"_set": {"Transfer": 1, "Reserve": 2}}`: a flag set

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::codec::Codec;
use crate::error::{Error, Result};

mod literal;
mod parser;

pub use parser::parse_type;

/// Nesting limit for type strings and for the literals built from them.
const MAX_TYPE_DEPTH: usize = 512;

/// Alias chains longer than this are treated as cycles.
const MAX_ALIAS_CHAIN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    Null,
    Bool,
    Text,
    Bytes,
    Json,
    H256,
    AccountId,
    Int { bits: u16, signed: bool },
    Compact(Box<TypeDef>),
    Option(Box<TypeDef>),
    Result(Box<TypeDef>, Box<TypeDef>),
    Vec(Box<TypeDef>),
    VecFixed(Box<TypeDef>, usize),
    Tuple(Vec<TypeDef>),
    BTreeSet(Box<TypeDef>),
    BTreeMap(Box<TypeDef>, Box<TypeDef>),
    HashMap(Box<TypeDef>, Box<TypeDef>),
    Struct(Vec<(String, TypeDef)>),
    Enum(Vec<(String, TypeDef)>),
    Set(Vec<(String, u64)>),
    Named(String),
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use serde_json::{Map, Value as Json};
        let fields_json = |fields: &[(String, TypeDef)]| -> Map<String, Json> {
            fields
                .iter()
                .map(|(n, t)| (n.clone(), Json::String(t.to_string())))
                .collect()
        };
        match self {
            TypeDef::Null => f.write_str("Null"),
            TypeDef::Bool => f.write_str("bool"),
            TypeDef::Text => f.write_str("Text"),
            TypeDef::Bytes => f.write_str("Bytes"),
            TypeDef::Json => f.write_str("Json"),
            TypeDef::H256 => f.write_str("H256"),
            TypeDef::AccountId => f.write_str("AccountId"),
            TypeDef::Int { bits, signed } => {
                write!(f, "{}{}", if *signed { 'i' } else { 'u' }, bits)
            }
            TypeDef::Compact(t) => write!(f, "Compact<{t}>"),
            TypeDef::Option(t) => write!(f, "Option<{t}>"),
            TypeDef::Result(ok, err) => write!(f, "Result<{ok}, {err}>"),
            TypeDef::Vec(t) => write!(f, "Vec<{t}>"),
            TypeDef::VecFixed(t, n) => write!(f, "[{t}; {n}]"),
            TypeDef::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(|t| t.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
            TypeDef::BTreeSet(t) => write!(f, "BTreeSet<{t}>"),
            TypeDef::BTreeMap(k, v) => write!(f, "BTreeMap<{k}, {v}>"),
            TypeDef::HashMap(k, v) => write!(f, "HashMap<{k}, {v}>"),
            TypeDef::Struct(fields) => write!(f, "{}", Json::Object(fields_json(fields))),
            TypeDef::Enum(variants) => {
                write!(f, "{}", serde_json::json!({ "_enum": fields_json(variants) }))
            }
            TypeDef::Set(flags) => {
                let defs: Map<String, Json> =
                    flags.iter().map(|(n, b)| (n.clone(), Json::from(*b))).collect();
                write!(f, "{}", serde_json::json!({ "_set": defs }))
            }
            TypeDef::Named(name) => f.write_str(name),
        }
    }
}

/// Named type definitions for one chain.
///
/// Built mutably, then shared: codec values hold an `Arc<Registry>`
/// back-reference.
pub struct Registry {
    chain: String,
    types: BTreeMap<String, TypeDef>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("chain", &self.chain)
            .field("types", &self.types.len())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new("development")
    }
}

impl Registry {
    pub fn new(chain: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            types: BTreeMap::new(),
        }
    }

    pub fn shared(chain: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(chain))
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn register(&mut self, name: impl Into<String>, def: TypeDef) {
        self.types.insert(name.into(), def);
    }

    pub fn register_json(&mut self, name: &str, def: &serde_json::Value) -> Result<()> {
        let def = type_def_from_json(name, def)?;
        self.register(name, def);
        Ok(())
    }

    /// Register every `name: definition` pair of a JSON object.
    pub fn register_all_json(&mut self, defs: &serde_json::Value) -> Result<()> {
        let map = defs
            .as_object()
            .ok_or_else(|| Error::TypeDef("type definitions must be a JSON object".to_string()))?;
        for (name, def) in map {
            self.register_json(name, def)?;
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Follow `Named` aliases until a structural definition is reached.
    pub fn resolve<'a>(&'a self, def: &'a TypeDef) -> Result<&'a TypeDef> {
        let mut current = def;
        for _ in 0..MAX_ALIAS_CHAIN {
            match current {
                TypeDef::Named(name) => {
                    current = self
                        .lookup(name)
                        .ok_or_else(|| Error::TypeDef(format!("unknown type {name:?}")))?;
                }
                other => return Ok(other),
            }
        }
        Err(Error::TypeDef(format!("alias cycle through {def}")))
    }

    /// Build a codec value of `type_str` from a JSON literal.
    pub fn create_type(
        self: &Arc<Self>,
        type_str: &str,
        literal: &serde_json::Value,
    ) -> Result<Arc<dyn Codec>> {
        let def = parse_type(type_str)?;
        literal::build(self, &def, literal, 0)
    }
}

fn type_def_from_json(name: &str, def: &serde_json::Value) -> Result<TypeDef> {
    use serde_json::Value as Json;
    match def {
        Json::String(s) => parse_type(s),
        Json::Object(map) if map.contains_key("_enum") => match &map["_enum"] {
            Json::Array(names) => names
                .iter()
                .map(|n| {
                    n.as_str()
                        .map(|s| (s.to_string(), TypeDef::Null))
                        .ok_or_else(|| Error::TypeDef(format!("{name}: enum variant names must be strings")))
                })
                .collect::<Result<Vec<_>>>()
                .map(TypeDef::Enum),
            Json::Object(variants) => variants
                .iter()
                .map(|(n, t)| Ok((n.clone(), field_type(name, t)?)))
                .collect::<Result<Vec<_>>>()
                .map(TypeDef::Enum),
            _ => Err(Error::TypeDef(format!("{name}: _enum must be an array or object"))),
        },
        Json::Object(map) if map.contains_key("_set") => {
            let flags = map["_set"]
                .as_object()
                .ok_or_else(|| Error::TypeDef(format!("{name}: _set must be an object")))?;
            flags
                .iter()
                .filter(|(n, _)| n.as_str() != "_bitLength")
                .map(|(n, b)| {
                    b.as_u64()
                        .map(|bit| (n.clone(), bit))
                        .ok_or_else(|| Error::TypeDef(format!("{name}: flag {n} must be an integer")))
                })
                .collect::<Result<Vec<_>>>()
                .map(TypeDef::Set)
        }
        Json::Object(fields) => fields
            .iter()
            .map(|(n, t)| Ok((n.clone(), field_type(name, t)?)))
            .collect::<Result<Vec<_>>>()
            .map(TypeDef::Struct),
        _ => Err(Error::TypeDef(format!("{name}: unsupported definition {def}"))),
    }
}

fn field_type(owner: &str, t: &serde_json::Value) -> Result<TypeDef> {
    t.as_str()
        .ok_or_else(|| Error::TypeDef(format!("{owner}: field types must be strings")))
        .and_then(parse_type)
}
