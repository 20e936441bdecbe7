//! Symbol key encoding
//!
//! Doxygen keys are lowercase and contain only ASCII letters, digits and
//! `_xx` escapes: every other byte of the UTF-8 text becomes `_` followed by
//! two lowercase hex digits. `spl_pz` is stored as `spl_5fpz`.

use std::fmt::Write;

/// Encode arbitrary text into key form
///
/// The text is lowercased first, so `encode_key("SplPar") == "splpar"`.
pub fn encode_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            key.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                write!(key, "_{byte:02x}").unwrap();
            }
        }
    }
    key
}

/// Decode a key back into the lowercase symbol text
///
/// Malformed escapes are kept literally, and byte sequences that are not
/// valid UTF-8 are replaced with U+FFFD.
pub fn decode_key(key: &str) -> String {
    let bytes = key.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_' {
            if let Some(byte) = bytes.get(i + 1..i + 3).and_then(parse_hex_pair) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// True if `key` is exactly what [`encode_key`] would produce for its decoded text
pub fn is_canonical_key(key: &str) -> bool {
    !key.is_empty() && encode_key(&decode_key(key)) == key
}

fn parse_hex_pair(pair: &[u8]) -> Option<u8> {
    let text = std::str::from_utf8(pair).ok()?;
    if !text.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
        return None;
    }
    u8::from_str_radix(text, 16).ok()
}
