//! Sealing of provider tokens at rest.
//!
//! OAuth access and refresh tokens are bearer credentials for someone
//! else's ad spend, so they are never stored in plaintext. [`SealKey`]
//! wraps an AES-256-GCM key; sealed values are stored as BYTEA with the
//! random 96-bit nonce prepended to the ciphertext:
//!
//! ```text
//! [ 12-byte nonce | ciphertext + 16-byte tag ]
//! ```

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;

use crate::hex;

/// Key length in bytes (AES-256).
pub const SEAL_KEY_LEN: usize = 32;

/// Nonce length in bytes (GCM standard).
const NONCE_LEN: usize = 12;

/// Errors from sealing or unsealing token material.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SealError {
    #[error("seal key must be {} hex characters", SEAL_KEY_LEN * 2)]
    BadKey,

    #[error("sealed value is truncated or corrupt")]
    Malformed,

    #[error("decryption failed (wrong key or tampered ciphertext)")]
    Crypto,
}

/// An AES-256-GCM key for sealing provider tokens.
#[derive(Clone)]
pub struct SealKey(Key<Aes256Gcm>);

impl SealKey {
    /// Parse a key from its 64-character hex form (`TOKEN_SEAL_KEY`).
    pub fn from_hex(hex_key: &str) -> Result<Self, SealError> {
        let bytes = hex::decode(hex_key).ok_or(SealError::BadKey)?;
        if bytes.len() != SEAL_KEY_LEN {
            return Err(SealError::BadKey);
        }
        Ok(Self(*Key::<Aes256Gcm>::from_slice(&bytes)))
    }

    /// Encrypt a token. Each call uses a fresh random nonce, so sealing
    /// the same token twice yields different bytes.
    pub fn seal(&self, plaintext: &str) -> Result<Vec<u8>, SealError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce_bytes);

        let cipher = Aes256Gcm::new(&self.0);
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|_| SealError::Crypto)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Decrypt a value produced by [`seal`](Self::seal).
    pub fn unseal(&self, sealed: &[u8]) -> Result<String, SealError> {
        if sealed.len() <= NONCE_LEN {
            return Err(SealError::Malformed);
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new(&self.0);
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| SealError::Crypto)?;

        String::from_utf8(plaintext).map_err(|_| SealError::Malformed)
    }
}

// Never print key material.
impl std::fmt::Debug for SealKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SealKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn seal_unseal_round_trip() {
        let key = SealKey::from_hex(KEY_HEX).unwrap();
        let sealed = key.seal("ya29.access-token-value").unwrap();
        assert_eq!(key.unseal(&sealed).unwrap(), "ya29.access-token-value");
    }

    #[test]
    fn sealing_twice_yields_different_bytes() {
        let key = SealKey::from_hex(KEY_HEX).unwrap();
        let a = key.seal("same-token").unwrap();
        let b = key.seal("same-token").unwrap();
        assert_ne!(a, b, "nonces must be random per seal");
    }

    #[test]
    fn wrong_key_fails_to_unseal() {
        let key = SealKey::from_hex(KEY_HEX).unwrap();
        let other = SealKey::from_hex(
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        )
        .unwrap();
        let sealed = key.seal("secret").unwrap();
        assert_eq!(other.unseal(&sealed), Err(SealError::Crypto));
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let key = SealKey::from_hex(KEY_HEX).unwrap();
        let mut sealed = key.seal("secret").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert_eq!(key.unseal(&sealed), Err(SealError::Crypto));
    }

    #[test]
    fn truncated_value_is_malformed() {
        let key = SealKey::from_hex(KEY_HEX).unwrap();
        assert_eq!(key.unseal(&[0u8; 5]), Err(SealError::Malformed));
    }

    #[test]
    fn bad_keys_are_rejected() {
        assert!(SealKey::from_hex("deadbeef").is_err());
        assert!(SealKey::from_hex("not hex at all").is_err());
    }
}
