//! The token issuer: turns a request into a signed token string.
//!
//! Whether tokens are signed or placeholders is decided once, when the
//! issuer is built, through [`IssuerMode`]. Callers never need to sniff
//! configuration at request time.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use rtc_token_core::content::Content;
use rtc_token_core::{
    build_privileges, build_token, crypto, decode_token_with, AppId, Message, Privilege,
    PrivilegeTable, Role, UserId,
};

use crate::config::{IssuerConfig, SaltPolicy, DEFAULT_TTL_SECS};
use crate::error::{IssuerError, Result};

/// Prefix of placeholder tokens produced in test mode.
pub const TEST_TOKEN_PREFIX: &str = "test_token_";

/// Whether a token string is a test-mode placeholder.
pub fn is_test_token(token: &str) -> bool {
    token.starts_with(TEST_TOKEN_PREFIX)
}

/// How an issuer produces tokens.
#[derive(Debug, Clone)]
pub enum IssuerMode {
    /// No certificate: return `test_token_<channel>_<uid>` placeholders.
    Test,
    /// Sign real tokens with the app certificate.
    Live { app_certificate: SecretString },
}

impl IssuerMode {
    /// Choose the mode from a certificate: empty means test mode.
    pub fn from_certificate(app_certificate: SecretString) -> Self {
        if app_certificate.expose_secret().is_empty() {
            IssuerMode::Test
        } else {
            IssuerMode::Live { app_certificate }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, IssuerMode::Live { .. })
    }
}

/// A request for a channel token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequest {
    /// Channel to join. Validate with [`crate::is_valid_channel_name`] first.
    pub channel_name: String,
    /// RTC user id.
    pub user_id: UserId,
    /// Role in the channel.
    #[serde(default)]
    pub role: Role,
    /// Validity in seconds. `None` uses the issuer's default.
    #[serde(default)]
    pub ttl_secs: Option<u32>,
}

impl TokenRequest {
    pub fn new(channel_name: impl Into<String>, user_id: UserId, role: Role) -> Self {
        Self {
            channel_name: channel_name.into(),
            user_id,
            role,
            ttl_secs: None,
        }
    }

    /// Set the validity window.
    pub fn ttl_secs(mut self, ttl_secs: u32) -> Self {
        self.ttl_secs = Some(ttl_secs);
        self
    }
}

/// What a decoded token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub app_id: AppId,
    pub user_id: UserId,
    pub salt: u32,
    /// Issuance time (unix seconds).
    pub issued_at: u32,
    pub privileges: PrivilegeTable,
    pub signature: Vec<u8>,
}

impl TokenClaims {
    /// Expiry of a privilege, if granted.
    pub fn expires_at(&self, privilege: Privilege) -> Option<u32> {
        self.privileges.get(privilege)
    }

    /// Whether the token grants any publish privilege.
    pub fn can_publish(&self) -> bool {
        [
            Privilege::PublishAudioStream,
            Privilege::PublishVideoStream,
            Privilege::PublishDataStream,
        ]
        .into_iter()
        .any(|p| self.privileges.contains(p))
    }
}

/// Issues (and locally verifies) channel access tokens for one app.
///
/// Holds no mutable state. Share it behind an `Arc` or clone it freely.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    app_id: AppId,
    mode: IssuerMode,
    default_ttl_secs: u32,
    salt_policy: SaltPolicy,
}

impl TokenIssuer {
    /// Create an issuer with the given mode.
    pub fn new(app_id: AppId, mode: IssuerMode) -> Self {
        if !mode.is_live() {
            tracing::warn!(
                "RTC token issuer for app {} has no certificate; issuing placeholder tokens",
                app_id
            );
        }
        Self {
            app_id,
            mode,
            default_ttl_secs: DEFAULT_TTL_SECS,
            salt_policy: SaltPolicy::default(),
        }
    }

    /// Build from configuration. An empty certificate selects test mode.
    pub fn from_config(config: &IssuerConfig) -> Result<Self> {
        let app_id = AppId::new(config.app_id.clone())?;
        let mode = IssuerMode::from_certificate(config.app_certificate.clone());
        Ok(Self::new(app_id, mode)
            .with_default_ttl(config.default_ttl_secs)
            .with_salt_policy(config.salt_policy))
    }

    /// Set the TTL used when a request carries none.
    pub fn with_default_ttl(mut self, ttl_secs: u32) -> Self {
        self.default_ttl_secs = ttl_secs;
        self
    }

    /// Set the salt policy.
    pub fn with_salt_policy(mut self, salt_policy: SaltPolicy) -> Self {
        self.salt_policy = salt_policy;
        self
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn mode(&self) -> &IssuerMode {
        &self.mode
    }

    /// Issue a token valid from `now` for the request's TTL.
    ///
    /// Pure apart from an optional random salt: the same request and `now`
    /// give the same token under [`SaltPolicy::Timestamp`].
    pub fn generate_token(&self, request: &TokenRequest, now: u32) -> Result<String> {
        let app_certificate = match &self.mode {
            IssuerMode::Test => {
                tracing::debug!(
                    channel = %request.channel_name,
                    uid = %request.user_id,
                    "Issuing placeholder RTC token"
                );
                return Ok(format!(
                    "{}{}_{}",
                    TEST_TOKEN_PREFIX, request.channel_name, request.user_id
                ));
            }
            IssuerMode::Live { app_certificate } => app_certificate,
        };

        let ttl_secs = request.ttl_secs.unwrap_or(self.default_ttl_secs);
        // Past 2106-02-07 the u32 field cannot represent the expiry.
        let expire_at = now.saturating_add(ttl_secs);
        let privileges = build_privileges(request.role, expire_at);
        let salt = self.salt_policy.salt(now);

        let token = build_token(
            &self.app_id,
            app_certificate.expose_secret().as_bytes(),
            &request.channel_name,
            request.user_id,
            &privileges,
            salt,
            now,
        )?;

        tracing::debug!(
            channel = %request.channel_name,
            uid = %request.user_id,
            role = %request.role,
            expire_at,
            "Issued RTC token"
        );
        Ok(token)
    }

    /// Issue a token valid from the current wall-clock time.
    pub fn generate_token_now(&self, request: &TokenRequest) -> Result<String> {
        self.generate_token(request, unix_now())
    }

    /// Decode a token's claims without checking its signature or expiry.
    pub fn inspect(&self, token: &str) -> Result<TokenClaims> {
        let decoded = decode_token_with(token, self.app_id.len())?;
        let content = Content::decode(&decoded.content)?;
        let message = Message::decode(&content.message)?;

        Ok(TokenClaims {
            app_id: decoded.app_id,
            user_id: content.user_id,
            salt: message.salt,
            issued_at: message.ts,
            privileges: message.privileges,
            signature: content.signature,
        })
    }

    /// Fully verify a token for `channel_name` at time `now`.
    ///
    /// Checks the app id, the HMAC signature (constant-time), and that the
    /// join privilege is present and not yet expired.
    pub fn verify(&self, token: &str, channel_name: &str, now: u32) -> Result<TokenClaims> {
        let IssuerMode::Live { app_certificate } = &self.mode else {
            return Err(IssuerError::MissingCredential);
        };

        let decoded = decode_token_with(token, self.app_id.len())?;
        if decoded.app_id != self.app_id {
            return Err(IssuerError::AppIdMismatch {
                expected: self.app_id.to_string(),
                found: decoded.app_id.to_string(),
            });
        }

        let content = Content::decode(&decoded.content)?;
        let signature_ok = crypto::verify(
            app_certificate.expose_secret().as_bytes(),
            self.app_id.as_str(),
            channel_name,
            content.user_id,
            &content.message,
            &content.signature,
        );
        if !signature_ok {
            tracing::debug!(channel = %channel_name, uid = %content.user_id, "RTC token signature mismatch");
            return Err(IssuerError::SignatureMismatch);
        }

        let message = Message::decode(&content.message)?;
        let privilege = Privilege::JoinChannel;
        let expired_at = message
            .privileges
            .get(privilege)
            .ok_or(IssuerError::PrivilegeNotGranted(privilege))?;
        if now >= expired_at {
            return Err(IssuerError::Expired {
                privilege,
                expired_at,
                now,
            });
        }

        Ok(TokenClaims {
            app_id: decoded.app_id,
            user_id: content.user_id,
            salt: message.salt,
            issued_at: message.ts,
            privileges: message.privileges,
            signature: content.signature,
        })
    }
}

/// Issue a token from raw credentials.
///
/// An empty `app_certificate` yields a `test_token_` placeholder.
pub fn generate_token(
    app_id: &str,
    app_certificate: &str,
    channel_name: &str,
    user_id: UserId,
    role: Role,
    ttl_secs: u32,
    now: u32,
) -> Result<String> {
    let app_id = AppId::new(app_id)?;
    let mode = IssuerMode::from_certificate(SecretString::from(app_certificate.to_string()));
    let request = TokenRequest::new(channel_name, user_id, role).ttl_secs(ttl_secs);
    TokenIssuer::new(app_id, mode).generate_token(&request, now)
}

/// Current unix time in seconds, clamped to the `u32` range.
pub fn unix_now() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    u32::try_from(secs).unwrap_or(u32::MAX)
}
