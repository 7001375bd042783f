#![no_main]
use libfuzzer_sys::fuzz_target;
use sanitize::{Options, Registry, sanitize_codec, sanitize_json};

// Input is `<type string>\n<JSON literal>`.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };
    let Some((type_str, literal)) = s.split_once('\n') else { return };
    let Ok(literal) = serde_json::from_str::<serde_json::Value>(literal) else { return };

    let registry = Registry::shared("fuzz");
    let Ok(codec) = registry.create_type(type_str, &literal) else { return };
    let _ = codec.to_u8a();
    let _ = codec.to_json();

    let options = Options::default();
    if let Ok(out) = sanitize_codec(codec.as_ref(), &options) {
        let again = sanitize_json(&out, &options).unwrap();
        assert_eq!(again, out, "sanitized output is not stable for {type_str}");
    }
});
