//! Token string encoding.
//!
//! ```text
//! token = "006" || app_id || base64url(zlib(content_bytes))
//! ```
//!
//! The base64 alphabet is the URL-safe one (`-` and `_` in place of `+` and
//! `/`) with `=` padding kept. The app id is embedded raw, and decoding
//! splits it off by its known fixed length.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::content::{encode_content, MAX_CONTENT_LEN};
use crate::crypto::sign;
use crate::error::CoreError;
use crate::message::encode_message;
use crate::privilege::PrivilegeTable;
use crate::types::{AppId, UserId};

/// The token format version this crate produces and accepts.
pub const TOKEN_VERSION: &str = "006";

/// Length of app ids issued by the RTC platform.
pub const APP_ID_LENGTH: usize = 32;

/// A decoded token: version tag, app id and raw content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub version: String,
    pub app_id: AppId,
    pub content: Vec<u8>,
}

impl Token {
    pub fn new(app_id: AppId, content: Vec<u8>) -> Self {
        Self {
            version: TOKEN_VERSION.to_string(),
            app_id,
            content,
        }
    }

    /// Encode to the token string.
    pub fn encode(&self) -> Result<String, CoreError> {
        encode_token(&self.app_id, &self.content)
    }
}

/// Compress, base64url-encode and prefix content bytes.
pub fn encode_token(app_id: &AppId, content: &[u8]) -> Result<String, CoreError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(content)
        .map_err(|e| CoreError::EncodingError(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| CoreError::EncodingError(e.to_string()))?;

    let payload = URL_SAFE.encode(compressed);

    let mut token = String::with_capacity(TOKEN_VERSION.len() + app_id.len() + payload.len());
    token.push_str(TOKEN_VERSION);
    token.push_str(app_id.as_str());
    token.push_str(&payload);
    Ok(token)
}

/// Decode a token whose app id has the platform's standard length.
pub fn decode_token(token: &str) -> Result<Token, CoreError> {
    decode_token_with(token, APP_ID_LENGTH)
}

/// Decode a token, splitting the app id off at `app_id_len` characters.
pub fn decode_token_with(token: &str, app_id_len: usize) -> Result<Token, CoreError> {
    let version = match token.get(..TOKEN_VERSION.len()) {
        Some(v) if v == TOKEN_VERSION => v,
        _ => {
            let found: String = token.chars().take(TOKEN_VERSION.len()).collect();
            return Err(CoreError::UnsupportedVersion(found));
        }
    };

    let app_id = TOKEN_VERSION
        .len()
        .checked_add(app_id_len)
        .and_then(|split| token.get(TOKEN_VERSION.len()..split))
        .ok_or_else(|| {
            CoreError::InvalidAppId(format!(
                "token too short for a {}-character app id",
                app_id_len
            ))
        })?;
    let app_id = AppId::new(app_id)?;

    let payload = &token[TOKEN_VERSION.len() + app_id.len()..];
    if payload.is_empty() {
        return Err(CoreError::CorruptToken("empty payload".into()));
    }

    let compressed = URL_SAFE
        .decode(payload)
        .map_err(|e| CoreError::CorruptToken(format!("base64: {}", e)))?;

    let mut content = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .take(MAX_CONTENT_LEN as u64 + 1)
        .read_to_end(&mut content)
        .map_err(|e| CoreError::CorruptToken(format!("inflate: {}", e)))?;
    if content.len() > MAX_CONTENT_LEN {
        return Err(CoreError::CorruptToken(
            "content inflates past maximum size".into(),
        ));
    }

    Ok(Token {
        version: version.to_string(),
        app_id,
        content,
    })
}

/// Run the full pipeline: message, signature, content, token string.
pub fn build_token(
    app_id: &AppId,
    app_certificate: &[u8],
    channel_name: &str,
    user_id: UserId,
    privileges: &PrivilegeTable,
    salt: u32,
    ts: u32,
) -> Result<String, CoreError> {
    let message = encode_message(salt, ts, privileges)?;
    let signature = sign(app_certificate, app_id.as_str(), channel_name, user_id, &message);
    let content = encode_content(signature.as_ref(), user_id, &message)?;
    encode_token(app_id, &content)
}
