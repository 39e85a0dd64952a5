//! Golden test vectors for byte-exact verification.
//!
//! Each vector fixes every input to token generation and pins the
//! HMAC-SHA256 signature and the content bytes that get compressed into
//! the token payload. The expected values were computed independently of
//! this codebase from the documented layouts.

use rtc_token_core::{
    build_privileges, encode_content, encode_message, sign, AppId, CoreError, Role, UserId,
};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub app_id: &'static str,
    pub app_certificate: &'static str,
    pub channel_name: &'static str,
    pub user_id: u32,
    pub role: Role,
    pub ttl_secs: u32,
    /// Issuance time; also the salt.
    pub now: u32,
    /// Expected message bytes (hex).
    pub expected_message: &'static str,
    /// Expected signature (hex).
    pub expected_signature: &'static str,
    /// Expected uncompressed content bytes (hex).
    pub expected_content: &'static str,
}

impl GoldenVector {
    pub fn expire_at(&self) -> u32 {
        self.now.saturating_add(self.ttl_secs)
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "publisher consultation",
            app_id: "app123456789012345678901234567890",
            app_certificate: "cert_secret",
            channel_name: "consultation_abc",
            user_id: 42,
            role: Role::Publisher,
            ttl_secs: 3600,
            now: 1_700_000_000,
            expected_message: "00f1536500f153650400010010ff5365020010ff5365030010ff5365040010ff5365",
            expected_signature: "414354bfd2221e81addf90ec3003de53de7223735175fff07049d895332e2efe",
            expected_content: "2000414354bfd2221e81addf90ec3003de53de7223735175fff07049d895332e2efe\
                               2a000000220000f1536500f153650400010010ff5365020010ff5365030010ff53\
                               65040010ff5365",
        },
        GoldenVector {
            name: "subscriber consultation",
            app_id: "app123456789012345678901234567890",
            app_certificate: "cert_secret",
            channel_name: "consultation_abc",
            user_id: 42,
            role: Role::Subscriber,
            ttl_secs: 3600,
            now: 1_700_000_000,
            expected_message: "00f1536500f153650100010010ff5365",
            expected_signature: "8b46257b35fd13fc96342d2de35d878b3f0fe13758fff05764aba7111700846f",
            expected_content: "20008b46257b35fd13fc96342d2de35d878b3f0fe13758fff05764aba7111700846f\
                               2a000000100000f1536500f153650100010010ff5365",
        },
        GoldenVector {
            name: "standard app id, short ttl",
            app_id: "0123456789abcdef0123456789abcdef",
            app_certificate: "5f4dcc3b5aa765d61d8327deb882cf99",
            channel_name: "farmer_17_expert_3",
            user_id: 17,
            role: Role::Publisher,
            ttl_secs: 900,
            now: 1_736_870_400,
            expected_message: "008a8667008a866704000100848d86670200848d86670300848d86670400848d8667",
            expected_signature: "c54d71325345fbd81f2d715ee292a6fc4a40f8c662bf4644eede8ed25e15ddf0",
            expected_content: "2000c54d71325345fbd81f2d715ee292a6fc4a40f8c662bf4644eede8ed25e15ddf0\
                               110000002200008a8667008a866704000100848d86670200848d86670300848d86\
                               670400848d8667",
        },
        GoldenVector {
            name: "all zero inputs",
            app_id: "0123456789abcdef0123456789abcdef",
            app_certificate: "5f4dcc3b5aa765d61d8327deb882cf99",
            channel_name: "a",
            user_id: 0,
            role: Role::Subscriber,
            ttl_secs: 0,
            now: 0,
            expected_message: "00000000000000000100010000000000",
            expected_signature: "565f2400d365945fa383900237d845dd3b2070654c13e9e1bf695dae8fe7e53d",
            expected_content: "2000565f2400d365945fa383900237d845dd3b2070654c13e9e1bf695dae8fe7e53d\
                               00000000100000000000000000000100010000000000",
        },
        GoldenVector {
            name: "max channel and user id",
            app_id: "0123456789abcdef0123456789abcdef",
            app_certificate: "5f4dcc3b5aa765d61d8327deb882cf99",
            channel_name: "ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ",
            user_id: u32::MAX,
            role: Role::Publisher,
            ttl_secs: 86_400,
            now: 1_800_000_000,
            expected_message: "00d2496b00d2496b0400010080234b6b020080234b6b030080234b6b040080234b6b",
            expected_signature: "2caa6f31403406f7d5d71a4447037a09296496fca1692705fa192a54d1dc93ea",
            expected_content: "20002caa6f31403406f7d5d71a4447037a09296496fca1692705fa192a54d1dc93ea\
                               ffffffff220000d2496b00d2496b0400010080234b6b020080234b6b030080234b\
                               6b040080234b6b",
        },
    ]
}

/// Build the message bytes for a vector (salt and ts both set to `now`).
pub fn message_from_vector(vector: &GoldenVector) -> Result<Vec<u8>, CoreError> {
    let privileges = build_privileges(vector.role, vector.expire_at());
    encode_message(vector.now, vector.now, &privileges)
}

/// Build the uncompressed content bytes for a vector.
pub fn content_from_vector(vector: &GoldenVector) -> Result<Vec<u8>, CoreError> {
    let app_id = AppId::new(vector.app_id)?;
    let user_id = UserId(vector.user_id);
    let message = message_from_vector(vector)?;
    let signature = sign(
        vector.app_certificate.as_bytes(),
        app_id.as_str(),
        vector.channel_name,
        user_id,
        &message,
    );
    encode_content(signature.as_ref(), user_id, &message)
}

/// Check every vector against its expected content bytes.
///
/// Returns `(name, matches, actual_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = content_from_vector(v)
                .map(hex::encode)
                .unwrap_or_else(|e| format!("error: {}", e));
            let matches = actual == v.expected_content;
            (v.name.to_string(), matches, actual)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtc_token_core::{decode_content, decode_message, Privilege};

    #[test]
    fn test_vectors_message_bytes() {
        for vector in all_vectors() {
            let message = message_from_vector(&vector).unwrap();
            assert_eq!(hex::encode(message), vector.expected_message, "{}", vector.name);
        }
    }

    #[test]
    fn test_vectors_signature_bytes() {
        for vector in all_vectors() {
            let message = message_from_vector(&vector).unwrap();
            let signature = sign(
                vector.app_certificate.as_bytes(),
                vector.app_id,
                vector.channel_name,
                UserId(vector.user_id),
                &message,
            );
            assert_eq!(signature.to_hex(), vector.expected_signature, "{}", vector.name);
        }
    }

    #[test]
    fn test_vectors_content_bytes() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "{} produced {}", name, actual);
        }
    }

    #[test]
    fn test_vectors_decode_back() {
        for vector in all_vectors() {
            let content = hex::decode(vector.expected_content).unwrap();
            let (signature, user_id, message) = decode_content(&content).unwrap();
            assert_eq!(hex::encode(signature), vector.expected_signature);
            assert_eq!(user_id, UserId(vector.user_id));

            let (salt, ts, privileges) = decode_message(&message).unwrap();
            assert_eq!(salt, vector.now);
            assert_eq!(ts, vector.now);
            assert_eq!(privileges.get(Privilege::JoinChannel), Some(vector.expire_at()));
            assert_eq!(privileges.len(), vector.role.privileges().len());
        }
    }
}
