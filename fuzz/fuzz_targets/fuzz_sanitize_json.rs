#![no_main]
use libfuzzer_sys::fuzz_target;
use sanitize::{Error, Options, sanitize_json};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        match sanitize_json(&value, &Options::default()) {
            Ok(out) => {
                if out != value {
                    panic!(
                        "plain JSON changed!\nInput: {}\nOutput: {}",
                        value,
                        out
                    );
                }
            }
            Err(Error::DepthExceeded { .. }) => {}
            Err(e) => panic!("plain JSON rejected: {}\nInput: {}", e, value),
        }
    }
});
