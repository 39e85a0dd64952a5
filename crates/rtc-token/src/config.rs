//! Issuer configuration, loaded once at startup.
//!
//! Values come from environment variables prefixed with `RTC_`:
//!
//! | variable | field | default |
//! |---|---|---|
//! | `RTC_APP_ID` | `app_id` | required |
//! | `RTC_APP_CERTIFICATE` | `app_certificate` | empty (test mode) |
//! | `RTC_DEFAULT_TTL_SECS` | `default_ttl_secs` | 3600 |
//! | `RTC_SALT_POLICY` | `salt_policy` | `timestamp` |

use config::{Config, ConfigError, Environment, Map};
use secrecy::SecretString;
use serde::Deserialize;

/// TTL applied when a request does not name one.
pub const DEFAULT_TTL_SECS: u32 = 3600;

/// How the message salt is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaltPolicy {
    /// Salt equals the issuance timestamp. Matches the tokens the platform
    /// already accepts, but carries no randomness.
    #[default]
    Timestamp,
    /// Salt drawn from the thread-local CSPRNG. Opt-in only.
    Random,
}

impl SaltPolicy {
    /// Pick the salt for a token issued at `now`.
    pub fn salt(self, now: u32) -> u32 {
        match self {
            SaltPolicy::Timestamp => now,
            SaltPolicy::Random => rand::random(),
        }
    }
}

/// Process-wide issuer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuerConfig {
    /// App id assigned by the RTC platform.
    pub app_id: String,
    /// App certificate. Empty selects test mode.
    pub app_certificate: SecretString,
    /// TTL for requests that do not carry one.
    pub default_ttl_secs: u32,
    /// Salt selection.
    pub salt_policy: SaltPolicy,
}

impl IssuerConfig {
    /// Build a config in code, with defaults for everything but the credentials.
    pub fn new(app_id: impl Into<String>, app_certificate: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_certificate: SecretString::from(app_certificate.into()),
            default_ttl_secs: DEFAULT_TTL_SECS,
            salt_policy: SaltPolicy::default(),
        }
    }

    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn load_from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::load_from(Some(vars))
    }

    fn load_from(vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("app_certificate", "")?
            .set_default("default_ttl_secs", i64::from(DEFAULT_TTL_SECS))?
            .set_default("salt_policy", "timestamp")?
            // RTC_APP_ID -> app_id, RTC_DEFAULT_TTL_SECS -> default_ttl_secs, ...
            .add_source(
                Environment::with_prefix("RTC")
                    .prefix_separator("_")
                    .source(vars),
            )
            .build()?;

        config.try_deserialize()
    }
}
