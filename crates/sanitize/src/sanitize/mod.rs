//! Normalization of mixed host/codec payloads into canonical JSON.
//!
//! Every integer codec comes out as a base-10 string, whatever its native
//! JSON would have been. Falsy host scalars pass through untouched, codec
//! values go through the variant dispatcher, containers are rebuilt
//! element by element.

pub mod classify;
mod dispatch;
pub mod validation;

use std::fmt;

use serde_json::Value as Json;

use crate::codec::Codec;
use crate::error::{Diagnostic, Error, Result};
use crate::options::Options;
use crate::value::Value;

pub use classify::{as_tagged, is_tagged_value};
pub use validation::{is_any_json, is_array_any_json, is_object_any_json};

pub fn sanitize_numbers(data: &Value) -> Result<Json> {
    sanitize_with(data, &Options::default())
}

pub fn sanitize_with(data: &Value, options: &Options) -> Result<Json> {
    Walker::new(options).value(data)
}

/// Sanitize a codec value directly, skipping host classification.
pub fn sanitize_codec(codec: &dyn Codec, options: &Options) -> Result<Json> {
    Walker::new(options).tagged(codec)
}

/// Plain JSON is already canonical; this re-checks it under the depth budget.
pub fn sanitize_json(data: &Json, options: &Options) -> Result<Json> {
    Walker::new(options).value(&Value::from(data.clone()))
}

#[derive(Debug, Clone)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Recursion state for one call: depth budget and the current path, used in
/// error reports.
pub(crate) struct Walker<'o> {
    options: &'o Options,
    depth: usize,
    path: Vec<Segment>,
}

struct PathDisplay<'a>(&'a [Segment]);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("root");
        }
        for (idx, seg) in self.0.iter().enumerate() {
            match seg {
                Segment::Field(name) if idx > 0 => write!(f, ".{}", name)?,
                Segment::Field(name) => f.write_str(name)?,
                Segment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

impl<'o> Walker<'o> {
    fn new(options: &'o Options) -> Self {
        Self {
            options,
            depth: 0,
            path: Vec::new(),
        }
    }

    fn path_string(&self) -> String {
        PathDisplay(&self.path).to_string()
    }

    /// Run `f` one level deeper, optionally under a named path segment.
    fn nested<T>(
        &mut self,
        segment: Option<Segment>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let pushed = segment.is_some();
        if let Some(seg) = segment {
            self.path.push(seg);
        }
        self.depth += 1;
        let out = if self.depth > self.options.max_depth {
            let path = self.path_string();
            Diagnostic::new(Diagnostic::KIND_DEPTH_EXCEEDED, None, format!("depth {}", self.depth))
                .emit(&path);
            Err(Error::DepthExceeded {
                limit: self.options.max_depth,
                path,
            })
        } else {
            f(self)
        };
        self.depth -= 1;
        if pushed {
            self.path.pop();
        }
        out
    }

    pub(crate) fn field(&mut self, name: &str, value: &Value) -> Result<Json> {
        self.nested(Some(Segment::Field(name.to_string())), |w| w.value(value))
    }

    pub(crate) fn index(&mut self, idx: usize, value: &Value) -> Result<Json> {
        self.nested(Some(Segment::Index(idx)), |w| w.value(value))
    }

    pub(crate) fn codec_field(&mut self, name: &str, codec: &dyn Codec) -> Result<Json> {
        self.nested(Some(Segment::Field(name.to_string())), |w| w.tagged(codec))
    }

    pub(crate) fn codec_index(&mut self, idx: usize, codec: &dyn Codec) -> Result<Json> {
        self.nested(Some(Segment::Index(idx)), |w| w.tagged(codec))
    }

    /// A wrapped inner value: one level deeper, same path.
    pub(crate) fn codec_inner(&mut self, codec: &dyn Codec) -> Result<Json> {
        self.nested(None, |w| w.tagged(codec))
    }

    /// Entry point for any host value.
    pub(crate) fn value(&mut self, value: &Value) -> Result<Json> {
        if value.is_falsy() {
            return self.scalar(value);
        }

        if let Some(codec) = as_tagged(value) {
            return self.tagged(codec);
        }

        match value {
            Value::Set(items) | Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    out.push(self.index(idx, item)?);
                }
                Ok(Json::Array(out))
            }
            Value::Object(entries) => {
                let mut out = serde_json::Map::with_capacity(entries.len());
                for (key, item) in entries {
                    self.check_unique(&out, key)?;
                    let v = self.field(key, item)?;
                    out.insert(key.clone(), v);
                }
                Ok(Json::Object(out))
            }
            _ => self.scalar(value),
        }
    }

    /// Terminal case: the value must already be a JSON scalar.
    fn scalar(&self, value: &Value) -> Result<Json> {
        let canonical = !self.options.validate_scalars || is_any_json(value);
        let json = match value {
            Value::Null => Some(Json::Null),
            Value::Bool(b) => Some(Json::Bool(*b)),
            Value::String(s) => Some(Json::String(s.clone())),
            Value::Number(n) => n.to_json().map(Json::Number),
            _ => None,
        };
        match json {
            Some(json) if canonical => Ok(json),
            _ => Err(self.uncanonicalizable(value)),
        }
    }

    /// Fails when `key` was already written to `out`.
    pub(crate) fn check_unique(&self, out: &serde_json::Map<String, Json>, key: &str) -> Result<()> {
        if out.contains_key(key) {
            return Err(self.uncanonicalizable_with(format!("duplicate key {key:?}")));
        }
        Ok(())
    }

    fn uncanonicalizable(&self, value: &Value) -> Error {
        self.uncanonicalizable_with(format!("{value:?}"))
    }

    fn uncanonicalizable_with(&self, snapshot: String) -> Error {
        let path = self.path_string();
        let diagnostic = Diagnostic::new(Diagnostic::KIND_UNCANONICALIZABLE, None, snapshot);
        diagnostic.emit(&path);
        Error::Uncanonicalizable { path, diagnostic }
    }
}
