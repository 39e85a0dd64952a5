//! Channel name validation.
//!
//! Callers apply this gate before requesting a token; the issuer itself
//! signs whatever channel name it is given.

use crate::error::{IssuerError, Result};

/// Longest accepted channel name.
pub const MAX_CHANNEL_NAME_LEN: usize = 64;

/// Check a channel name against `^[A-Za-z0-9_]{1,64}$`.
pub fn is_valid_channel_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_CHANNEL_NAME_LEN
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Like [`is_valid_channel_name`], as a `Result` for `?` chains.
pub fn validate_channel_name(name: &str) -> Result<()> {
    if is_valid_channel_name(name) {
        Ok(())
    } else {
        Err(IssuerError::InvalidChannelName(name.to_string()))
    }
}
