//! Error types for the token codecs.

use thiserror::Error;

/// Errors raised while building or decoding a token.
///
/// Every decode-side variant is recoverable: the caller rejects the token
/// and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("malformed content: {0}")]
    MalformedContent(String),

    #[error("unsupported token version: {0:?}")]
    UnsupportedVersion(String),

    #[error("invalid app id: {0}")]
    InvalidAppId(String),

    #[error("corrupt token: {0}")]
    CorruptToken(String),

    #[error("invalid user id: {0}")]
    InvalidUserId(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}

impl CoreError {
    /// Whether this error came from decoding untrusted token bytes.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            CoreError::MalformedMessage(_)
                | CoreError::MalformedContent(_)
                | CoreError::UnsupportedVersion(_)
                | CoreError::InvalidAppId(_)
                | CoreError::CorruptToken(_)
        )
    }
}
