use codec_sanitize::{Error, Registry, TypeDef, Value, sanitize_numbers};
use serde_json::json;

#[test]
fn aliases_resolve_through_the_registry() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = Registry::new("dev");
    registry.register_all_json(&json!({
        "Balance": "u128",
        "BalanceOf": "Balance",
        "Locks": "Vec<BalanceOf>"
    }))?;
    assert_eq!(registry.lookup("Balance"), Some(&TypeDef::Int { bits: 128, signed: false }));

    let registry = registry.into_shared();
    let locks = registry.create_type("Locks", &json!([1, "0x10000000000000000"]))?;
    assert_eq!(locks.to_raw_type(), "Vec<BalanceOf>");
    assert_eq!(
        sanitize_numbers(&Value::Codec(locks))?,
        json!(["1", "18446744073709551616"])
    );
    Ok(())
}

#[test]
fn json_type_builds_a_struct_any() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::shared("dev");
    let meta = registry.create_type("Json", &json!({"name": "dot", "decimals": 10}))?;
    assert_eq!(meta.to_raw_type(), "Json");
    assert_eq!(
        sanitize_numbers(&Value::Codec(meta))?,
        json!({"name": "dot", "decimals": 10})
    );
    Ok(())
}

#[test]
fn enum_from_name_list() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = Registry::new("dev");
    registry.register_json("Status", &json!({"_enum": ["Free", "Reserved"]}))?;
    let registry = registry.into_shared();
    let status = registry.create_type("Status", &json!("Reserved"))?;
    assert_eq!(status.to_u8a(), vec![1]);
    assert_eq!(status.to_json(), json!("Reserved"));
    Ok(())
}

#[test]
fn unknown_types_fail() {
    let registry = Registry::shared("dev");
    let err = registry.create_type("Missing", &json!(1)).unwrap_err();
    assert!(matches!(err, Error::TypeDef(_)));
    assert_eq!(err.status_code(), 400);
    assert!(!err.is_server_fault());
}

#[test]
fn alias_cycles_fail() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = Registry::new("dev");
    registry.register_json("A", &json!("B"))?;
    registry.register_json("B", &json!("A"))?;
    let registry = registry.into_shared();
    assert!(matches!(
        registry.create_type("A", &json!(1)),
        Err(Error::TypeDef(_))
    ));
    Ok(())
}

#[test]
fn malformed_type_strings_fail() {
    let registry = Registry::shared("dev");
    for bad in ["Vec<", "Option<u8, u8>", "[u8; x]", "u32 junk"] {
        assert!(
            matches!(registry.create_type(bad, &json!(null)), Err(Error::TypeDef(_))),
            "{bad} should not parse"
        );
    }
}

#[test]
fn literal_mismatches_fail() {
    let registry = Registry::shared("dev");
    let cases = [
        ("u8", json!(256)),
        ("i8", json!(-129)),
        ("u32", json!(-1)),
        ("u64", json!("twelve")),
        ("bool", json!("true")),
        ("Text", json!(1)),
        ("AccountId", json!("0x01")),
        ("(u32, u32)", json!([1])),
        ("BTreeMap<u32, u32>", json!([[1]])),
    ];
    for (type_str, literal) in cases {
        let err = registry.create_type(type_str, &literal).unwrap_err();
        assert!(
            matches!(err, Error::Literal { .. }),
            "{type_str} from {literal}: {err}"
        );
        assert_eq!(err.status_code(), 400);
    }
}

#[test]
fn struct_literals_reject_unknown_fields() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = Registry::new("dev");
    registry.register_json("Pair", &json!({"left": "u32", "right": "u32"}))?;
    let registry = registry.into_shared();
    let err = registry
        .create_type("Pair", &json!({"left": 1, "middle": 2}))
        .unwrap_err();
    assert!(err.to_string().contains("middle"));
    Ok(())
}

#[test]
fn register_all_requires_an_object() {
    let mut registry = Registry::default();
    assert_eq!(registry.chain(), "development");
    assert!(registry.register_all_json(&json!(["u32"])).is_err());
    assert!(registry.register_json("Bad", &json!(12)).is_err());
}
