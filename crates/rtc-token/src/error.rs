//! Error types for the issuer.

use rtc_token_core::{CoreError, Privilege};
use thiserror::Error;

/// Errors that can occur while issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum IssuerError {
    /// Codec error.
    #[error("token codec error: {0}")]
    Core(#[from] CoreError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Channel name fails the allowed pattern.
    #[error("invalid channel name: {0:?}")]
    InvalidChannelName(String),

    /// Verification needs the app certificate, which a test-mode issuer lacks.
    #[error("no app certificate configured")]
    MissingCredential,

    /// Token was issued for a different application.
    #[error("app id mismatch: expected {expected}, found {found}")]
    AppIdMismatch { expected: String, found: String },

    /// Signature does not match app, channel, user and message.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Token does not carry the privilege at all.
    #[error("privilege not granted: {0:?}")]
    PrivilegeNotGranted(Privilege),

    /// Privilege has expired.
    #[error("{privilege:?} expired at {expired_at} (now {now})")]
    Expired {
        privilege: Privilege,
        expired_at: u32,
        now: u32,
    },
}

impl IssuerError {
    /// Whether the token itself was rejected, as opposed to a local fault.
    pub fn is_rejection(&self) -> bool {
        match self {
            IssuerError::Core(e) => e.is_decode_error(),
            IssuerError::AppIdMismatch { .. }
            | IssuerError::SignatureMismatch
            | IssuerError::PrivilegeNotGranted(_)
            | IssuerError::Expired { .. } => true,
            IssuerError::Config(_)
            | IssuerError::InvalidChannelName(_)
            | IssuerError::MissingCredential => false,
        }
    }
}

/// Result type for issuer operations.
pub type Result<T> = std::result::Result<T, IssuerError>;
