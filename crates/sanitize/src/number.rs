//! Integer encoding helpers shared by the integer and compact codecs.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Largest integer a JSON number can carry without precision loss
/// (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Widest integer whose native JSON may still be a plain number.
pub const NATIVE_NUMBER_MAX_BITS: u16 = 128;

/// Whether `value` fits a `bits`-wide integer of the given signedness.
pub fn fits(value: &BigInt, bits: u16, signed: bool) -> bool {
    if signed {
        let half = BigInt::one() << (bits as usize - 1);
        value >= &(-&half) && value < &half
    } else {
        !value.is_negative() && value.bits() <= bits as u64
    }
}

/// Little-endian, fixed-width, two's complement bytes.
pub fn to_le_bytes(value: &BigInt, bits: u16) -> Vec<u8> {
    let len = bits as usize / 8;
    let mut bytes = if value.is_negative() {
        value.to_signed_bytes_le()
    } else {
        value.magnitude().to_bytes_le()
    };
    let fill = if value.is_negative() { 0xff } else { 0x00 };
    bytes.resize(len, fill);
    bytes
}

/// Big-endian `0x` hex padded to the type width.
pub fn to_padded_hex(value: &BigInt, bits: u16) -> String {
    let mut bytes = to_le_bytes(value, bits);
    bytes.reverse();
    format!("0x{}", hex::encode(bytes))
}

/// The JSON an integer codec natively produces: a number while it is small
/// enough, otherwise a padded hex string.
pub fn native_json(value: &BigInt, bits: u16) -> serde_json::Value {
    if bits <= NATIVE_NUMBER_MAX_BITS && value.magnitude() <= &BigUint::from(MAX_SAFE_INTEGER) {
        if let Some(i) = value.to_i64() {
            return serde_json::Value::Number(i.into());
        }
    }
    serde_json::Value::String(to_padded_hex(value, bits))
}

/// Decimal digits grouped in threes, e.g. `-1,234,567`.
pub fn format_grouped(value: &BigInt) -> String {
    let digits = value.magnitude().to_str_radix(10);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value.sign() == Sign::Minus {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (idx + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse a decimal or `0x` hex integer literal.
pub fn parse_int_literal(s: &str) -> Option<BigInt> {
    let s = s.trim();
    if let Some(hex_digits) = s.strip_prefix("0x") {
        if hex_digits.is_empty() {
            return Some(BigInt::zero());
        }
        return BigUint::parse_bytes(hex_digits.as_bytes(), 16).map(BigInt::from);
    }
    s.parse::<BigInt>().ok()
}

/// SCALE compact encoding of an unsigned integer.
pub fn encode_compact(value: &BigUint) -> Vec<u8> {
    if let Some(v) = value.to_u32() {
        if v < 1 << 6 {
            return vec![(v << 2) as u8];
        }
        if v < 1 << 14 {
            return ((v << 2) as u16 | 0b01).to_le_bytes().to_vec();
        }
        if v < 1 << 30 {
            return ((v << 2) | 0b10).to_le_bytes().to_vec();
        }
    }
    let bytes = value.to_bytes_le();
    let mut out = Vec::with_capacity(bytes.len() + 1);
    out.push((((bytes.len() - 4) as u8) << 2) | 0b11);
    out.extend_from_slice(&bytes);
    out
}

pub fn encode_compact_len(len: usize) -> Vec<u8> {
    encode_compact(&BigUint::from(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits() {
        assert!(fits(&BigInt::from(255), 8, false));
        assert!(!fits(&BigInt::from(256), 8, false));
        assert!(!fits(&BigInt::from(-1), 8, false));
        assert!(fits(&BigInt::from(-128), 8, true));
        assert!(!fits(&BigInt::from(128), 8, true));
    }

    #[test]
    fn test_native_json_threshold() {
        assert_eq!(native_json(&BigInt::from(42), 128), serde_json::json!(42));
        assert_eq!(
            native_json(&BigInt::from(MAX_SAFE_INTEGER), 64),
            serde_json::json!(9007199254740991u64)
        );
        assert_eq!(
            native_json(&BigInt::from(MAX_SAFE_INTEGER + 1), 64),
            serde_json::json!("0x0020000000000000")
        );
        // wide types go hex even when small
        assert_eq!(
            native_json(&BigInt::from(1), 256),
            serde_json::json!(format!("0x{}01", "0".repeat(62)))
        );
    }

    #[test]
    fn test_negative_hex_is_twos_complement() {
        assert_eq!(to_padded_hex(&BigInt::from(-1), 16), "0xffff");
        assert_eq!(to_le_bytes(&BigInt::from(-2), 32), vec![0xfe, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(&BigInt::from(0)), "0");
        assert_eq!(format_grouped(&BigInt::from(999)), "999");
        assert_eq!(format_grouped(&BigInt::from(1000)), "1,000");
        assert_eq!(format_grouped(&BigInt::from(-1234567)), "-1,234,567");
    }

    #[test]
    fn test_parse_int_literal() {
        assert_eq!(parse_int_literal("12"), Some(BigInt::from(12)));
        assert_eq!(parse_int_literal("0xff"), Some(BigInt::from(255)));
        assert_eq!(parse_int_literal("-7"), Some(BigInt::from(-7)));
        assert_eq!(parse_int_literal("abc"), None);
    }

    #[test]
    fn test_encode_compact() {
        assert_eq!(encode_compact(&BigUint::from(0u32)), vec![0x00]);
        assert_eq!(encode_compact(&BigUint::from(1u32)), vec![0x04]);
        assert_eq!(encode_compact(&BigUint::from(63u32)), vec![0xfc]);
        assert_eq!(encode_compact(&BigUint::from(64u32)), vec![0x01, 0x01]);
        assert_eq!(encode_compact(&BigUint::from(16383u32)), vec![0xfd, 0xff]);
        assert_eq!(
            encode_compact(&BigUint::from(16384u32)),
            vec![0x02, 0x00, 0x01, 0x00]
        );
        assert_eq!(
            encode_compact(&BigUint::from(1u64 << 30)),
            vec![0x03, 0x00, 0x00, 0x00, 0x40]
        );
    }
}
