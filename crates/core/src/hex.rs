//! Minimal hex encode/decode helpers (no extra dep).

/// Encode bytes as a lowercase hex string.
pub(crate) fn encode(bytes: impl AsRef<[u8]>) -> String {
    bytes
        .as_ref()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Decode a hex string into bytes. Returns `None` on odd length or
/// non-hex characters.
pub(crate) fn decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let bytes = [0u8, 1, 0x7f, 0xde, 0xad, 0xbe, 0xef, 255];
        let encoded = encode(bytes);
        assert_eq!(encoded, "00017fdeadbeefff");
        assert_eq!(decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_odd_length_and_garbage() {
        assert!(decode("abc").is_none());
        assert!(decode("zz").is_none());
    }
}
