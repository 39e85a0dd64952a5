//! # RTC Token
//!
//! Issues access tokens that let a farmer's or expert's client join a
//! real-time consultation channel on the third-party RTC platform.
//!
//! ## Overview
//!
//! - **Issuance**: [`TokenIssuer::generate_token`] turns a [`TokenRequest`]
//!   (channel, user, role, TTL) into an opaque version `006` token string.
//! - **Modes**: an issuer is either [`IssuerMode::Live`] (signs with the app
//!   certificate) or [`IssuerMode::Test`] (returns `test_token_...`
//!   placeholders). The mode is fixed at construction.
//! - **Verification**: [`TokenIssuer::verify`] checks a token locally
//!   without the platform SDK.
//! - **Channel names**: [`is_valid_channel_name`] gates names before a
//!   token is requested.
//!
//! Issuance is pure given `now`: no I/O, no shared state, safe to call
//! from any number of threads.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rtc_token::{is_valid_channel_name, IssuerConfig, Role, TokenIssuer, TokenRequest, UserId};
//!
//! fn example() -> rtc_token::Result<()> {
//!     // RTC_APP_ID / RTC_APP_CERTIFICATE from the environment
//!     let config = IssuerConfig::load()?;
//!     let issuer = TokenIssuer::from_config(&config)?;
//!
//!     let channel = "consultation_abc";
//!     assert!(is_valid_channel_name(channel));
//!
//!     let request = TokenRequest::new(channel, UserId(42), Role::Publisher).ttl_secs(3600);
//!     let token = issuer.generate_token(&request, rtc_token::unix_now())?;
//!     println!("{}", token);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `rtc_token::core` - wire codecs (message, content, token, signature)

pub mod channel;
pub mod config;
pub mod error;
pub mod issuer;

pub use rtc_token_core as core;

pub use crate::channel::{is_valid_channel_name, validate_channel_name, MAX_CHANNEL_NAME_LEN};
pub use crate::config::{IssuerConfig, SaltPolicy, DEFAULT_TTL_SECS};
pub use crate::error::{IssuerError, Result};
pub use crate::issuer::{
    generate_token, is_test_token, unix_now, IssuerMode, TokenClaims, TokenIssuer, TokenRequest,
    TEST_TOKEN_PREFIX,
};

pub use rtc_token_core::{AppId, Privilege, PrivilegeTable, Role, UserId};
