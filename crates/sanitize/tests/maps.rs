use std::sync::Arc;

use codec_sanitize::types::{CodecMap, FixedBytes, Int, MapKind, Sequence};
use codec_sanitize::{Codec, Diagnostic, Error, Registry, Value, sanitize_numbers};
use serde_json::json;

#[test]
fn account_keys_become_hex_strings() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");
    let alice = format!("0x{}", "01".repeat(32));
    let bob = format!("0x{}", "02".repeat(32));
    let balances = registry.create_type(
        "BTreeMap<AccountId, u128>",
        &json!({ alice.clone(): 5, bob.clone(): "1000000000000000000000" }),
    )?;

    let out = sanitize_numbers(&Value::Codec(balances))?;
    assert_eq!(out, json!({ alice: "5", bob: "1000000000000000000000" }));
    Ok(())
}

#[test]
fn integer_keys_become_decimal_strings() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");
    let era_points = registry.create_type(
        "BTreeMap<u128, Text>",
        &json!([["340282366920938463463374607431768211455", "max"], [7, "seven"]]),
    )?;
    assert_eq!(
        sanitize_numbers(&Value::Codec(era_points))?,
        json!({"340282366920938463463374607431768211455": "max", "7": "seven"})
    );

    let hashed = registry.create_type("HashMap<Text, u64>", &json!({"a": 1}))?;
    assert_eq!(hashed.to_raw_type(), "HashMap<Text, u64>");
    assert_eq!(sanitize_numbers(&Value::Codec(hashed))?, json!({"a": "1"}));
    Ok(())
}

#[test]
fn map_lookup_by_codec_key() {
    let registry = Registry::shared("dev");
    let key: Arc<dyn Codec> = Arc::new(FixedBytes::account_id(&registry, [9; 32]));
    let map = CodecMap::new(
        &registry,
        MapKind::BTreeMap,
        "AccountId",
        "u32",
        [(key.clone(), Arc::new(Int::u32(&registry, 4)) as Arc<dyn Codec>)],
    );
    assert_eq!(map.kind(), MapKind::BTreeMap);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(key.as_ref()).map(|v| v.to_json()), Some(json!(4)));
    assert!(map.get(&FixedBytes::h256(&registry, [9; 32])).is_none());
}

#[test]
fn tuple_keys_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");
    let map = registry.create_type("BTreeMap<(u32, u32), u8>", &json!([[[1, 2], 3]]))?;

    let err = sanitize_numbers(&Value::Codec(map)).unwrap_err();
    assert!(err.is_server_fault());
    assert_eq!(err.status_code(), 500);
    match &err {
        Error::NonScalarKey { path, diagnostic } => {
            assert_eq!(path, "root");
            assert_eq!(diagnostic.kind, Diagnostic::KIND_NON_SCALAR_KEY);
            assert_eq!(diagnostic.raw_type.as_deref(), Some("BTreeMap<(u32, u32), u8>"));
            assert_eq!(diagnostic.snapshot, r#"["1","2"]"#);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.diagnostic().is_some());
    Ok(())
}

#[test]
fn non_scalar_key_reports_its_path() {
    let registry = Registry::shared("dev");
    let key = Sequence::any(&registry, [Arc::new(Int::u32(&registry, 1)) as Arc<dyn Codec>]);
    let map = CodecMap::new(
        &registry,
        MapKind::HashMap,
        "Vec<u32>",
        "u32",
        [(Arc::new(key) as Arc<dyn Codec>, Arc::new(Int::u32(&registry, 2)) as Arc<dyn Codec>)],
    );
    let v = Value::object([("outer", Value::Array(vec![Value::codec(map)]))]);

    match sanitize_numbers(&v) {
        Err(Error::NonScalarKey { path, .. }) => assert_eq!(path, "outer[0]"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn repeated_keys_keep_the_last_value() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");
    let map = registry.create_type(
        "BTreeMap<u8, Text>",
        &json!([[1, "a"], [2, "c"], [1, "b"]]),
    )?;

    assert_eq!(map.to_u8a(), vec![8, 1, 4, b'b', 2, 4, b'c']);
    let out = sanitize_numbers(&Value::Codec(map))?;
    assert_eq!(serde_json::to_string(&out)?, r#"{"1":"b","2":"c"}"#);
    Ok(())
}

#[test]
fn repeated_keys_collapse_in_direct_construction() {
    let registry = Registry::shared("dev");
    let key = || Arc::new(FixedBytes::account_id(&registry, [1; 32])) as Arc<dyn Codec>;
    let map = CodecMap::new(
        &registry,
        MapKind::HashMap,
        "AccountId",
        "u32",
        [
            (key(), Arc::new(Int::u32(&registry, 1)) as Arc<dyn Codec>),
            (key(), Arc::new(Int::u32(&registry, 2)) as Arc<dyn Codec>),
        ],
    );
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(key().as_ref()).map(|v| v.to_json()), Some(json!(2)));
}
