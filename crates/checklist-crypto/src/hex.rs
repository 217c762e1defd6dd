//! Lowercase hex encoding used for token parts.

use crate::error::CryptoError;

pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn decode(hex: &str) -> Result<Vec<u8>, CryptoError> {
    if hex.len() % 2 != 0 {
        return Err(CryptoError::InvalidHex(
            "hex string must have even length".to_string(),
        ));
    }
    if !hex.is_ascii() {
        return Err(CryptoError::InvalidHex("non-ASCII input".to_string()));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| CryptoError::InvalidHex(format!("position {i}: {e}")))
        })
        .collect()
}
