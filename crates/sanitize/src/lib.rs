#![doc = include_str!("../README.md")]

pub mod codec;
pub mod error;
pub mod number;
pub mod options;
pub mod registry;
pub mod sanitize;
pub mod types;
pub mod value;

pub use crate::codec::{Codec, Variant, VariantKind};
pub use crate::error::{Diagnostic, Error, Result};
pub use crate::options::Options;
pub use crate::registry::{Registry, TypeDef};
pub use crate::sanitize::{
    is_any_json, is_tagged_value, sanitize_codec, sanitize_json, sanitize_numbers, sanitize_with,
};
pub use crate::value::{Number, Value};
