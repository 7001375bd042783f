use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("codec-sanitize"))
}

fn json_file(contents: &str) -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{}", contents)?;
    Ok(tmp)
}

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--type"));
    Ok(())
}

#[test]
fn plain_json_is_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = json_file("{\n  \"a\": 1,\n  \"b\": [true, \"x\", null]\n}\n")?;

    let output = bin().arg(tmp.path()).output()?;
    assert!(output.status.success());
    let out: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(out, serde_json::json!({"a": 1, "b": [true, "x", null]}));
    Ok(())
}

#[test]
fn typed_input_prints_decimal_strings() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = json_file("\"0xffffffffffffffffffffffffffffffff\"")?;

    bin()
        .args(["--type", "u128"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("\"340282366920938463463374607431768211455\"\n");
    Ok(())
}

#[test]
fn native_flag_shows_hex() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = json_file("9007199254740992")?;

    bin()
        .args(["--type", "u64", "--native"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("\"0x0020000000000000\"\n");
    Ok(())
}

#[test]
fn types_file_defines_named_types() -> Result<(), Box<dyn std::error::Error>> {
    let types = json_file(
        r#"{"chain": "polkadot", "types": {"Lock": {"_enum": {"Active": "Null", "Locked": "u128"}}}}"#,
    )?;
    let input = json_file(r#"{"Locked": "170141183460469231731687303715884105728"}"#)?;

    let output = bin()
        .args(["--type", "Lock", "--types"])
        .arg(types.path())
        .arg(input.path())
        .output()?;
    assert!(output.status.success());
    let out: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        out,
        serde_json::json!({"Locked": "170141183460469231731687303715884105728"})
    );
    Ok(())
}

#[test]
fn non_scalar_key_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = json_file("[[[1, 2], 3]]")?;

    bin()
        .args(["--type", "BTreeMap<(u32, u32), u8>"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-number key"));
    Ok(())
}

#[test]
fn depth_limit_is_configurable() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = json_file("[[[1]]]")?;

    bin().args(["--max-depth", "3"]).arg(tmp.path()).assert().success();
    bin()
        .args(["--max-depth", "2"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth"));
    Ok(())
}

#[test]
fn invalid_literal_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = json_file("300")?;

    bin()
        .args(["--type", "u8"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
    Ok(())
}
