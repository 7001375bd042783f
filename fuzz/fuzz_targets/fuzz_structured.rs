#![no_main]
use std::sync::Arc;

use libfuzzer_sys::{arbitrary, fuzz_target};
use arbitrary::Arbitrary;
use sanitize::types::{BTreeSetCodec, Int, OptionCodec, Sequence, Struct, Text};
use sanitize::{Codec, Registry, Value, sanitize_numbers};
use serde_json::Value as Json;

const MAX_DEPTH: usize = 6;
const MAX_ITEMS: usize = 8;

#[derive(Arbitrary, Debug)]
struct FuzzCodec {
    choice: u8,
}

impl FuzzCodec {
    fn build(
        &self,
        registry: &Arc<Registry>,
        u: &mut arbitrary::Unstructured,
        depth: usize,
    ) -> arbitrary::Result<Arc<dyn Codec>> {
        if depth >= MAX_DEPTH {
            return Ok(Arc::new(Int::u32(registry, u.arbitrary()?)));
        }
        Ok(match self.choice % 7 {
            0 | 1 => {
                let bits = Int::WIDTHS[u.int_in_range(0..=4)?];
                let raw: u128 = u.arbitrary()?;
                let value = if bits == 128 { raw } else { raw & ((1u128 << bits) - 1) };
                Arc::new(Int::unsigned(registry, bits, value).unwrap())
            }
            2 => Arc::new(Text::new(registry, u.arbitrary::<String>()?)),
            3 => {
                if u.arbitrary()? {
                    let inner: FuzzCodec = u.arbitrary()?;
                    Arc::new(OptionCodec::some(registry, inner.build(registry, u, depth + 1)?))
                } else {
                    Arc::new(OptionCodec::none(registry, "u32"))
                }
            }
            4 => Arc::new(Sequence::vec(registry, "Codec", self.items(registry, u, depth)?)),
            5 => Arc::new(BTreeSetCodec::new(registry, "Codec", self.items(registry, u, depth)?)),
            _ => {
                let mut builder = Struct::builder(registry);
                for (idx, item) in self.items(registry, u, depth)?.into_iter().enumerate() {
                    builder = builder.field(&format!("f{idx}"), item);
                }
                Arc::new(builder.build())
            }
        })
    }

    fn items(
        &self,
        registry: &Arc<Registry>,
        u: &mut arbitrary::Unstructured,
        depth: usize,
    ) -> arbitrary::Result<Vec<Arc<dyn Codec>>> {
        let size = u.int_in_range(0..=MAX_ITEMS)?;
        let mut out = Vec::with_capacity(size);
        for _ in 0..size {
            let fc: FuzzCodec = u.arbitrary()?;
            out.push(fc.build(registry, u, depth + 1)?);
        }
        Ok(out)
    }
}

fn has_number(v: &Json) -> bool {
    match v {
        Json::Number(_) => true,
        Json::Array(items) => items.iter().any(has_number),
        Json::Object(map) => map.values().any(has_number),
        _ => false,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);
    let registry = Registry::shared("fuzz");

    if let Ok(fc) = u.arbitrary::<FuzzCodec>() {
        if let Ok(codec) = fc.build(&registry, &mut u, 0) {
            let out = sanitize_numbers(&Value::Codec(codec.clone())).unwrap();
            if has_number(&out) {
                panic!(
                    "integer left as a JSON number!\nCodec: {}\nOutput: {}",
                    codec.to_raw_type(),
                    out
                );
            }
        }
    }
});
