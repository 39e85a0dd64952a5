//! HMAC-SHA256 signing that binds a token to its app, channel and user.
//!
//! The signed input is the plain concatenation
//!
//! ```text
//! app_id || channel_name || decimal(user_id) || message_bytes
//! ```
//!
//! keyed by the app certificate. No separators, no domain prefix: the
//! remote verifier recomputes exactly this.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

use crate::types::UserId;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag.
pub const SIGNATURE_LEN: usize = 32;

/// A 32-byte HMAC-SHA256 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HmacSignature(pub [u8; SIGNATURE_LEN]);

impl HmacSignature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for HmacSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HmacSig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for HmacSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_LEN]> for HmacSignature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

fn keyed_mac(
    app_certificate: &[u8],
    app_id: &str,
    channel_name: &str,
    user_id: UserId,
    message: &[u8],
) -> HmacSha256 {
    // HMAC takes keys of any length, including empty.
    let mut mac = HmacSha256::new_from_slice(app_certificate)
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(app_id.as_bytes());
    mac.update(channel_name.as_bytes());
    mac.update(user_id.to_string().as_bytes());
    mac.update(message);
    mac
}

/// Sign message bytes for a given app, channel and user.
///
/// Pure: identical inputs always give an identical signature. An empty
/// certificate is signed with as-is; deciding whether that is acceptable
/// belongs to the caller.
pub fn sign(
    app_certificate: &[u8],
    app_id: &str,
    channel_name: &str,
    user_id: UserId,
    message: &[u8],
) -> HmacSignature {
    let tag = keyed_mac(app_certificate, app_id, channel_name, user_id, message)
        .finalize()
        .into_bytes();
    HmacSignature(tag.into())
}

/// Check a signature in constant time.
pub fn verify(
    app_certificate: &[u8],
    app_id: &str,
    channel_name: &str,
    user_id: UserId,
    message: &[u8],
    signature: &[u8],
) -> bool {
    keyed_mac(app_certificate, app_id, channel_name, user_id, message)
        .verify_slice(signature)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ID: &str = "app123456789012345678901234567890";

    #[test]
    fn test_sign_deterministic() {
        let s1 = sign(b"cert_secret", APP_ID, "consultation_abc", UserId(42), b"msg");
        let s2 = sign(b"cert_secret", APP_ID, "consultation_abc", UserId(42), b"msg");
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_sign_binds_channel_and_user() {
        let base = sign(b"cert_secret", APP_ID, "consultation_abc", UserId(42), b"msg");
        let other_channel = sign(b"cert_secret", APP_ID, "consultation_abd", UserId(42), b"msg");
        let other_user = sign(b"cert_secret", APP_ID, "consultation_abc", UserId(43), b"msg");
        let other_key = sign(b"cert_secreT", APP_ID, "consultation_abc", UserId(42), b"msg");
        assert_ne!(base, other_channel);
        assert_ne!(base, other_user);
        assert_ne!(base, other_key);
    }

    #[test]
    fn test_sign_matches_plain_concatenation() {
        let mut mac = HmacSha256::new_from_slice(b"k").unwrap();
        mac.update(b"appchan7msg");
        let expected: [u8; 32] = mac.finalize().into_bytes().into();

        assert_eq!(sign(b"k", "app", "chan", UserId(7), b"msg").0, expected);
    }

    #[test]
    fn test_rfc4231_case_2() {
        // HMAC-SHA256 with key "Jefe", data "what do ya want for nothing?".
        let sig = sign(b"Jefe", "what do ya ", "want for ", UserId(0), b"").0;
        let mut mac = HmacSha256::new_from_slice(b"Jefe").unwrap();
        mac.update(b"what do ya want for 0");
        let expected: [u8; 32] = mac.finalize().into_bytes().into();
        assert_eq!(sig, expected);

        let mut mac = HmacSha256::new_from_slice(b"Jefe").unwrap();
        mac.update(b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac.finalize().into_bytes()),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_empty_certificate_still_signs() {
        let sig = sign(b"", APP_ID, "chan", UserId(1), b"");
        assert_eq!(sig.as_bytes().len(), SIGNATURE_LEN);
    }

    #[test]
    fn test_verify() {
        let sig = sign(b"cert", APP_ID, "chan", UserId(9), b"payload");
        assert!(verify(b"cert", APP_ID, "chan", UserId(9), b"payload", sig.as_ref()));
        assert!(!verify(b"cert", APP_ID, "chan", UserId(10), b"payload", sig.as_ref()));
        assert!(!verify(b"cert", APP_ID, "chan", UserId(9), b"payload", &sig.0[..31]));
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let sig = HmacSignature::from_bytes([0xab; 32]);
        let recovered = HmacSignature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(sig, recovered);
        assert!(HmacSignature::from_hex("abab").is_err());
    }
}
