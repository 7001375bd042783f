use std::fmt;
use std::sync::Arc;

use num_traits::Signed;

use crate::codec::{Codec, Variant, VariantKind};
use crate::error::{Error, Result};
use crate::number::encode_compact;
use crate::registry::Registry;
use crate::types::Int;

/// Variable-width encoding of an unsigned integer. Transparent in JSON.
#[derive(Debug, Clone)]
pub struct Compact {
    inner: Int,
}

impl Compact {
    pub fn new(inner: Int) -> Result<Self> {
        if inner.value().is_negative() || inner.is_signed() {
            return Err(Error::TypeDef(format!(
                "Compact<{}> requires an unsigned integer",
                inner.to_raw_type()
            )));
        }
        Ok(Self { inner })
    }

    pub fn unwrap(&self) -> &Int {
        &self.inner
    }
}

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Codec for Compact {
    fn registry(&self) -> &Arc<Registry> {
        self.inner.registry()
    }

    fn to_u8a(&self) -> Vec<u8> {
        encode_compact(self.inner.value().magnitude())
    }

    fn to_raw_type(&self) -> String {
        format!("Compact<{}>", self.inner.to_raw_type())
    }

    fn to_json(&self) -> serde_json::Value {
        self.inner.to_json()
    }

    fn to_human(&self) -> serde_json::Value {
        self.inner.to_human()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::Compact => Some(Variant::Compact(&self.inner)),
            _ => None,
        }
    }
}
