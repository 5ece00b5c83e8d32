//! OAuth state-token generation and verification.
//!
//! Every authorize URL carries a `state` parameter the provider echoes
//! back through the popup redirect. The token is self-contained so the
//! completion endpoint can verify it without a server-side session:
//!
//! ```text
//! {nonce}.{expiry_unix}.{hmac_sha256_hex(provider|nonce|expiry)}
//! ```
//!
//! The signature is keyed by the application secret and bound to the
//! provider, so a state minted for one provider cannot complete the flow
//! for another.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::hex;
use crate::provider::Provider;

type HmacSha256 = Hmac<Sha256>;

/// How long a state token stays valid. Popup flows finish in seconds;
/// ten minutes leaves room for a slow consent screen.
pub const STATE_TTL_SECS: i64 = 600;

/// Reasons a state token fails verification.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("state token is malformed")]
    Malformed,

    #[error("state token has expired")]
    Expired,

    #[error("state token signature mismatch")]
    BadSignature,
}

/// Mint a state token for `provider`, valid for [`STATE_TTL_SECS`].
pub fn issue_state(secret: &str, provider: Provider) -> String {
    issue_state_at(secret, provider, Utc::now().timestamp() + STATE_TTL_SECS)
}

/// Mint a state token with an explicit expiry (unix seconds).
pub fn issue_state_at(secret: &str, provider: Provider, expires_at: i64) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    let sig = sign(secret, provider, &nonce, expires_at);
    format!("{nonce}.{expires_at}.{sig}")
}

/// Verify a state token minted by [`issue_state`] for the same provider.
pub fn verify_state(secret: &str, provider: Provider, state: &str) -> Result<(), StateError> {
    let mut parts = state.splitn(3, '.');
    let (nonce, expiry_str, sig_hex) = match (parts.next(), parts.next(), parts.next()) {
        (Some(n), Some(e), Some(s)) if !n.is_empty() && !s.is_empty() => (n, e, s),
        _ => return Err(StateError::Malformed),
    };

    let expires_at: i64 = expiry_str.parse().map_err(|_| StateError::Malformed)?;
    let sig_bytes = hex::decode(sig_hex).ok_or(StateError::Malformed)?;

    // Check the signature before the expiry so a tampered expiry field
    // reports BadSignature rather than Expired.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(message(provider, nonce, expires_at).as_bytes());
    mac.verify_slice(&sig_bytes)
        .map_err(|_| StateError::BadSignature)?;

    if expires_at < Utc::now().timestamp() {
        return Err(StateError::Expired);
    }

    Ok(())
}

fn message(provider: Provider, nonce: &str, expires_at: i64) -> String {
    format!("{}|{}|{}", provider.as_str(), nonce, expires_at)
}

fn sign(secret: &str, provider: Provider, nonce: &str, expires_at: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(message(provider, nonce, expires_at).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
