use std::sync::Arc;

use codec_sanitize::types::{Compact, Int, Null, OptionCodec, Text};
use codec_sanitize::{Codec, Registry, Value, is_any_json, is_tagged_value, sanitize_numbers};
use serde_json::json;

#[test]
fn integer_encodings() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");
    let n = Int::u32(&registry, 5);
    assert_eq!(n.to_u8a(), vec![5, 0, 0, 0]);
    assert_eq!(n.encoded_length(), 4);
    assert_eq!(n.to_hex(), "0x00000005");
    assert_eq!(n.to_raw_type(), "u32");
    assert_eq!(n.to_string(), "5");
    assert_eq!(Int::u128(&registry, 1_000_000).to_human(), json!("1,000,000"));
    assert_eq!(Int::i64(&registry, -1).to_u8a(), vec![0xff; 8]);
    Ok(())
}

#[test]
fn native_integer_json_depends_on_magnitude() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");

    let safe = Int::u64(&registry, 9_007_199_254_740_991);
    assert_eq!(safe.to_json(), json!(9_007_199_254_740_991u64));
    assert_eq!(sanitize_numbers(&Value::codec(safe))?, json!("9007199254740991"));

    let unsafe_ = Int::u64(&registry, 9_007_199_254_740_992);
    assert_eq!(unsafe_.to_json(), json!("0x0020000000000000"));
    assert_eq!(sanitize_numbers(&Value::codec(unsafe_))?, json!("9007199254740992"));

    let min = Int::i64(&registry, i64::MIN);
    assert_eq!(min.to_json(), json!("0x8000000000000000"));
    assert_eq!(sanitize_numbers(&Value::codec(min))?, json!("-9223372036854775808"));

    let neg = registry.create_type("i128", &json!(-5))?;
    assert_eq!(neg.to_json(), json!(-5));
    assert_eq!(sanitize_numbers(&Value::Codec(neg))?, json!("-5"));

    let wide = registry.create_type("u256", &json!(1))?;
    assert_eq!(wide.to_json(), json!(format!("0x{}01", "00".repeat(31))));
    assert_eq!(sanitize_numbers(&Value::Codec(wide))?, json!("1"));
    Ok(())
}

#[test]
fn compact_encoding() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");
    assert_eq!(Compact::new(Int::u32(&registry, 1))?.to_u8a(), vec![0x04]);
    assert_eq!(Compact::new(Int::u32(&registry, 64))?.to_u8a(), vec![0x01, 0x01]);
    assert_eq!(
        Compact::new(Int::u32(&registry, 1 << 14))?.to_u8a(),
        vec![0x02, 0x00, 0x01, 0x00]
    );
    let compact = Compact::new(Int::u128(&registry, 1))?;
    assert_eq!(compact.to_raw_type(), "Compact<u128>");
    assert_eq!(compact.to_hex(), "0x04");
    Ok(())
}

#[test]
fn text_and_enum_bytes() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");
    assert_eq!(Text::new(&registry, "abc").to_u8a(), vec![12, b'a', b'b', b'c']);

    let result = registry.create_type("Result<u128, Text>", &json!({"Ok": 1}))?;
    assert_eq!(result.encoded_length(), 17);
    assert_eq!(&result.to_u8a()[..2], &[0u8, 1]);
    Ok(())
}

#[test]
fn hashing_and_equality() {
    let registry = Registry::shared("dev");
    let empty = Null::new(&registry);
    assert_eq!(
        hex::encode(empty.hash()),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    let a = Int::u32(&registry, 5);
    let b = Int::u32(&registry, 5);
    let wider = Int::u64(&registry, 5);
    assert!(a.eq_codec(&b));
    assert!(!a.eq_codec(&wider));
    assert_eq!(a.hash(), b.hash());
    assert_ne!(a.hash(), wider.hash());
    assert_eq!(Value::codec(a), Value::codec(b));
}

#[test]
fn emptiness() {
    let registry = Registry::shared("dev");
    assert!(Int::u32(&registry, 0).is_empty());
    assert!(!Int::u32(&registry, 1).is_empty());
    assert!(OptionCodec::none(&registry, "u32").is_empty());
    assert!(Text::new(&registry, "").is_empty());
    assert!(Null::new(&registry).is_empty());
}

#[test]
fn codecs_share_their_registry() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("polkadot");
    let value = registry.create_type("Option<Vec<u32>>", &json!([1, 2]))?;
    assert!(Arc::ptr_eq(value.registry(), &registry));
    assert_eq!(value.registry().chain(), "polkadot");
    Ok(())
}

#[test]
fn classification() {
    let registry = Registry::shared("dev");
    assert!(is_tagged_value(&Value::codec(Null::new(&registry))));
    assert!(is_tagged_value(&Value::codec(Int::u32(&registry, 0))));
    assert!(!is_tagged_value(&Value::from(json!({"a": 1}))));
    assert!(!is_tagged_value(&Value::Null));

    assert!(is_any_json(&Value::from(json!({"a": [1, "b", null]}))));
    assert!(!is_any_json(&Value::from(f64::NAN)));
    assert!(!is_any_json(&Value::Set(vec![])));
    assert!(!is_any_json(&Value::codec(Null::new(&registry))));
    assert!(!is_any_json(&Value::Object(vec![
        ("a".to_string(), Value::Null),
        ("a".to_string(), Value::Null),
    ])));
}
