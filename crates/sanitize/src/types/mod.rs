//! Concrete codec values.
//!
//! Each type implements [`crate::codec::Codec`] and declares the variant
//! views it supports. Byte encodings follow SCALE.

pub mod compact;
pub mod enumeration;
pub mod int;
pub mod map;
pub mod option;
pub mod primitive;
pub mod sequence;
pub mod sets;
pub mod structs;

pub use compact::Compact;
pub use enumeration::{Enum, EnumVariants};
pub use int::Int;
pub use map::{CodecMap, MapKind};
pub use option::{OptionCodec, ResultCodec};
pub use primitive::{Bool, Bytes, FixedBytes, Null, Text};
pub use sequence::{Sequence, SequenceKind};
pub use sets::{BTreeSetCodec, CodecSet};
pub use structs::{Struct, StructAny, StructBuilder};
