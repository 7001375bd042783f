//! The tagged codec capability set and its variant views.
//!
//! A codec value declares which shapes it can be viewed as through
//! [`Codec::variant`]. Several shapes specialize others: a struct is also a
//! map of its field names, an option is also an enum of `None`/`Some`. The
//! sanitizer resolves that overlap by probing kinds in
//! [`VariantKind::PRECEDENCE`] order and using the first view offered.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use sha2::{Digest, Sha256};

use crate::registry::Registry;
use crate::value::Value;

/// Variant tags, one per conversion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Option,
    Struct,
    StructAny,
    Enum,
    BTreeSet,
    CodecSet,
    Map,
    Compact,
    Array,
    Int,
}

impl VariantKind {
    /// Check order, most specific first.
    ///
    /// `Option` precedes `Enum` and `Struct` precedes `Map` because the former
    /// also expose the latter's view. Reordering these pairs changes output.
    pub const PRECEDENCE: [VariantKind; 10] = [
        VariantKind::Option,
        VariantKind::Struct,
        VariantKind::StructAny,
        VariantKind::Enum,
        VariantKind::BTreeSet,
        VariantKind::CodecSet,
        VariantKind::Map,
        VariantKind::Compact,
        VariantKind::Array,
        VariantKind::Int,
    ];
}

/// Borrowed view of a codec as one variant shape.
pub enum Variant<'a> {
    Option(Option<&'a dyn Codec>),
    /// Fields in declaration order; `None` marks an absent field.
    Struct(Vec<(&'a str, Option<&'a dyn Codec>)>),
    StructAny(&'a [(String, Value)]),
    /// `value` is `None` when the active tag carries no data.
    Enum {
        tag: &'a str,
        value: Option<&'a dyn Codec>,
    },
    BTreeSet(Vec<&'a dyn Codec>),
    CodecSet(Vec<&'a str>),
    Map(Vec<(&'a dyn Codec, &'a dyn Codec)>),
    Compact(&'a dyn Codec),
    Array(Vec<&'a dyn Codec>),
    Int(&'a BigInt),
}

impl Variant<'_> {
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Option(_) => VariantKind::Option,
            Variant::Struct(_) => VariantKind::Struct,
            Variant::StructAny(_) => VariantKind::StructAny,
            Variant::Enum { .. } => VariantKind::Enum,
            Variant::BTreeSet(_) => VariantKind::BTreeSet,
            Variant::CodecSet(_) => VariantKind::CodecSet,
            Variant::Map(_) => VariantKind::Map,
            Variant::Compact(_) => VariantKind::Compact,
            Variant::Array(_) => VariantKind::Array,
            Variant::Int(_) => VariantKind::Int,
        }
    }
}

/// A decoded, typed value from the metadata/encoding layer.
///
/// `Display` is the string conversion. Implementors must provide the byte
/// encoding, raw type, native JSON and registry; the remaining capabilities
/// derive from those.
pub trait Codec: fmt::Debug + fmt::Display + Send + Sync {
    fn registry(&self) -> &Arc<Registry>;

    /// SCALE byte encoding.
    fn to_u8a(&self) -> Vec<u8>;

    /// Type descriptor, e.g. `Compact<u128>` or `Vec<AccountId>`.
    fn to_raw_type(&self) -> String;

    /// Native JSON. Integers may come out as numbers or hex strings
    /// depending on magnitude.
    fn to_json(&self) -> serde_json::Value;

    fn to_human(&self) -> serde_json::Value {
        self.to_json()
    }

    fn encoded_length(&self) -> usize {
        self.to_u8a().len()
    }

    /// SHA-256 of the byte encoding.
    fn hash(&self) -> [u8; 32] {
        Sha256::digest(self.to_u8a()).into()
    }

    fn is_empty(&self) -> bool {
        self.to_u8a().iter().all(|b| *b == 0)
    }

    fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_u8a()))
    }

    fn eq_codec(&self, other: &dyn Codec) -> bool {
        self.to_raw_type() == other.to_raw_type() && self.to_u8a() == other.to_u8a()
    }

    /// View this value as `kind`, or `None` if it has no such shape.
    fn variant(&self, _kind: VariantKind) -> Option<Variant<'_>> {
        None
    }
}
