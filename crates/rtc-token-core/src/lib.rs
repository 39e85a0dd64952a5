//! # RTC Token Core
//!
//! Pure codecs for version `006` RTC channel access tokens.
//!
//! This crate contains no I/O, no clock and no configuration. Every function
//! is deterministic given its inputs, so a token produced here can be
//! reproduced byte for byte in tests and by the verifying platform.
//!
//! ## Pipeline
//!
//! ```text
//! Role + expiry ──► PrivilegeTable
//!                        │
//! salt, ts ────────► Message ──► bytes ─┐
//!                                       ├─► HMAC-SHA256 ──► signature
//! app id, channel, uid ─────────────────┘
//!
//! signature + uid + message bytes ──► Content ──► zlib ──► base64url
//!
//! "006" ++ app id ++ base64url  ==  token
//! ```
//!
//! ## Key Types
//!
//! - [`PrivilegeTable`] - ordered privilege code to expiry mapping
//! - [`Message`] - salt, timestamp and privileges
//! - [`Content`] - signature, user id and message bytes
//! - [`Token`] - version tag, app id and content bytes
//! - [`HmacSignature`] - 32-byte HMAC-SHA256 binding the token to its channel

pub mod content;
pub mod crypto;
pub mod error;
pub mod message;
pub mod privilege;
pub mod token;
pub mod types;
mod wire;

pub use content::{decode_content, encode_content, Content};
pub use crypto::{sign, HmacSignature};
pub use error::CoreError;
pub use message::{decode_message, encode_message, Message, MAX_PRIVILEGES};
pub use privilege::{build_privileges, Privilege, PrivilegeTable, Role};
pub use token::{
    build_token, decode_token, decode_token_with, encode_token, Token, APP_ID_LENGTH,
    TOKEN_VERSION,
};
pub use types::{AppId, UserId};
