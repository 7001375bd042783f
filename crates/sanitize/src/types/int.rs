use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;

use crate::codec::{Codec, Variant, VariantKind};
use crate::error::{Error, Result};
use crate::number;
use crate::registry::Registry;

/// Fixed-width integer, `u8`..`u256` or `i8`..`i256`.
#[derive(Debug, Clone)]
pub struct Int {
    registry: Arc<Registry>,
    value: BigInt,
    bits: u16,
    signed: bool,
}

impl Int {
    pub const WIDTHS: [u16; 6] = [8, 16, 32, 64, 128, 256];

    pub fn new(
        registry: &Arc<Registry>,
        bits: u16,
        signed: bool,
        value: impl Into<BigInt>,
    ) -> Result<Self> {
        let value = value.into();
        let type_name = raw_int_type(bits, signed);
        if !Self::WIDTHS.contains(&bits) {
            return Err(Error::TypeDef(format!("unsupported integer width {bits}")));
        }
        if !number::fits(&value, bits, signed) {
            return Err(Error::literal(type_name, format!("{value} is out of range")));
        }
        Ok(Self {
            registry: registry.clone(),
            value,
            bits,
            signed,
        })
    }

    pub fn unsigned(registry: &Arc<Registry>, bits: u16, value: impl Into<BigInt>) -> Result<Self> {
        Self::new(registry, bits, false, value)
    }

    pub fn signed(registry: &Arc<Registry>, bits: u16, value: impl Into<BigInt>) -> Result<Self> {
        Self::new(registry, bits, true, value)
    }

    pub fn u32(registry: &Arc<Registry>, value: u32) -> Self {
        Self::trusted(registry, 32, false, value)
    }

    pub fn u64(registry: &Arc<Registry>, value: u64) -> Self {
        Self::trusted(registry, 64, false, value)
    }

    pub fn u128(registry: &Arc<Registry>, value: u128) -> Self {
        Self::trusted(registry, 128, false, value)
    }

    pub fn i64(registry: &Arc<Registry>, value: i64) -> Self {
        Self::trusted(registry, 64, true, value)
    }

    fn trusted(registry: &Arc<Registry>, bits: u16, signed: bool, value: impl Into<BigInt>) -> Self {
        Self {
            registry: registry.clone(),
            value: value.into(),
            bits,
            signed,
        }
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn bit_length(&self) -> u16 {
        self.bits
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }
}

pub(crate) fn raw_int_type(bits: u16, signed: bool) -> String {
    format!("{}{}", if signed { 'i' } else { 'u' }, bits)
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Codec for Int {
    fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn to_u8a(&self) -> Vec<u8> {
        number::to_le_bytes(&self.value, self.bits)
    }

    fn to_raw_type(&self) -> String {
        raw_int_type(self.bits, self.signed)
    }

    fn to_json(&self) -> serde_json::Value {
        number::native_json(&self.value, self.bits)
    }

    fn to_human(&self) -> serde_json::Value {
        serde_json::Value::String(number::format_grouped(&self.value))
    }

    fn to_hex(&self) -> String {
        number::to_padded_hex(&self.value, self.bits)
    }

    fn variant(&self, kind: VariantKind) -> Option<Variant<'_>> {
        match kind {
            VariantKind::Int => Some(Variant::Int(&self.value)),
            _ => None,
        }
    }
}
