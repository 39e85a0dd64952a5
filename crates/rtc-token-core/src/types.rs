//! Strong type definitions for token inputs.
//!
//! Identifiers are newtypes so a channel name can never be passed where an
//! app id is expected, and so out-of-range user ids fail at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A numeric RTC user id.
///
/// The wire format stores it as `u32`. Conversions from wider or signed
/// integers fail with [`CoreError::InvalidUserId`] instead of truncating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl UserId {
    /// Create a user id from its wire value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the wire value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl TryFrom<i64> for UserId {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| CoreError::InvalidUserId(value.to_string()))
    }
}

impl TryFrom<u64> for UserId {
    type Error = CoreError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| CoreError::InvalidUserId(value.to_string()))
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| CoreError::InvalidUserId(s.to_string()))
    }
}

/// The application identity issued by the RTC platform.
///
/// Restricted to non-empty ASCII alphanumerics. The token splits the app id
/// off by position, so every character must be exactly one byte.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppId(String);

impl AppId {
    /// Validate and wrap an app id.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::InvalidAppId("empty".into()));
        }
        if !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidAppId(format!(
                "non-alphanumeric characters in {:?}",
                id
            )));
        }
        Ok(Self(id))
    }

    /// Get the app id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (equal to bytes).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated app id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppId({})", self.0)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AppId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AppId {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AppId> for String {
    fn from(id: AppId) -> Self {
        id.0
    }
}

impl FromStr for AppId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
