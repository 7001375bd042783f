use serde::Serialize;
use thiserror::Error;

use std::io;

/// Snapshot of the value that made a sanitize call fail.
///
/// Attached to the error so callers can inspect the failure without relying
/// on process output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Failure kind, one of the `KIND_*` constants.
    pub kind: &'static str,
    /// Raw type of the codec involved, when the failure happened inside one.
    pub raw_type: Option<String>,
    /// Debug or JSON rendering of the offending value.
    pub snapshot: String,
}

impl Diagnostic {
    pub const KIND_NON_SCALAR_KEY: &'static str = "non_scalar_key";
    pub const KIND_UNCANONICALIZABLE: &'static str = "uncanonicalizable_value";
    pub const KIND_DEPTH_EXCEEDED: &'static str = "depth_exceeded";

    pub fn new(kind: &'static str, raw_type: Option<String>, snapshot: String) -> Self {
        Self {
            kind,
            raw_type,
            snapshot,
        }
    }

    /// Emit the diagnostic as a structured tracing event.
    pub(crate) fn emit(&self, path: &str) {
        tracing::debug!(
            kind = self.kind,
            path,
            raw_type = self.raw_type.as_deref().unwrap_or("-"),
            snapshot = %self.snapshot,
            "sanitize failed"
        );
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected non-string and non-number key at {path} while sanitizing a map: {}", .diagnostic.snapshot)]
    NonScalarKey { path: String, diagnostic: Diagnostic },

    #[error("value at {path} could not be represented as canonical JSON: {}", .diagnostic.snapshot)]
    Uncanonicalizable { path: String, diagnostic: Diagnostic },

    #[error("nesting at {path} exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize, path: String },

    #[error("type definition error: {0}")]
    TypeDef(String),

    #[error("cannot build {type_name} from literal: {message}")]
    Literal { type_name: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn literal(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Literal {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// The attached diagnostic, for the sanitize failures that carry one.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::NonScalarKey { diagnostic, .. } | Error::Uncanonicalizable { diagnostic, .. } => {
                Some(diagnostic)
            }
            _ => None,
        }
    }

    /// True when the failure is a gap in sanitizer coverage rather than bad
    /// caller input.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Error::NonScalarKey { .. }
                | Error::Uncanonicalizable { .. }
                | Error::DepthExceeded { .. }
                | Error::Io(_)
        )
    }

    /// HTTP status an API layer should answer with.
    pub fn status_code(&self) -> u16 {
        if self.is_server_fault() { 500 } else { 400 }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
