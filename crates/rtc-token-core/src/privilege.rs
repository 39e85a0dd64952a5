//! Channel privileges and the role to privilege mapping.
//!
//! A token grants a set of privileges, each with its own expiry. The
//! numeric privilege codes are part of the wire format and are FROZEN.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A channel capability grantable by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Privilege {
    /// Join the channel.
    JoinChannel = 1,
    /// Publish an audio stream.
    PublishAudioStream = 2,
    /// Publish a video stream.
    PublishVideoStream = 3,
    /// Publish a data stream.
    PublishDataStream = 4,
}

impl Privilege {
    /// Every privilege, in code order.
    pub const ALL: [Privilege; 4] = [
        Privilege::JoinChannel,
        Privilege::PublishAudioStream,
        Privilege::PublishVideoStream,
        Privilege::PublishDataStream,
    ];

    /// Convert to the wire code.
    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Try to parse from a wire code.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::JoinChannel),
            2 => Some(Self::PublishAudioStream),
            3 => Some(Self::PublishVideoStream),
            4 => Some(Self::PublishDataStream),
            _ => None,
        }
    }
}

/// The role a user takes in a consultation channel.
///
/// Deserializes through [`Role::from_name`], so unknown names become
/// [`Role::Subscriber`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    /// May join and publish audio, video and data.
    Publisher,
    /// May only join.
    #[default]
    Subscriber,
}

impl Role {
    /// Parse a role name.
    ///
    /// Only the exact name `"publisher"` maps to [`Role::Publisher`];
    /// anything else, including other casings, is [`Role::Subscriber`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "publisher" => Role::Publisher,
            _ => Role::Subscriber,
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Publisher => "publisher",
            Role::Subscriber => "subscriber",
        }
    }

    /// The privileges this role is granted.
    ///
    /// This is the only place that decides what a token may do. A new role
    /// must be given an explicit entry here.
    pub fn privileges(self) -> &'static [Privilege] {
        match self {
            Role::Publisher => &Privilege::ALL,
            Role::Subscriber => &[Privilege::JoinChannel],
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role::from_name(&name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered mapping from privilege code to expiry (unix seconds).
///
/// Keys are raw `u16` codes so tables decoded from foreign tokens survive
/// codes this crate does not know. Iteration follows insertion order; codes
/// are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivilegeTable {
    entries: Vec<(u16, u32)>,
}

impl PrivilegeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the expiry for a privilege.
    ///
    /// Returns the previous expiry if the privilege was already present.
    pub fn insert(&mut self, privilege: Privilege, expire_at: u32) -> Option<u32> {
        self.insert_code(privilege.to_u16(), expire_at)
    }

    /// Insert or replace the expiry for a raw privilege code.
    pub fn insert_code(&mut self, code: u16, expire_at: u32) -> Option<u32> {
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some((_, existing)) => Some(std::mem::replace(existing, expire_at)),
            None => {
                self.entries.push((code, expire_at));
                None
            }
        }
    }

    /// Expiry for a privilege, if granted.
    pub fn get(&self, privilege: Privilege) -> Option<u32> {
        self.get_code(privilege.to_u16())
    }

    /// Expiry for a raw privilege code, if present.
    pub fn get_code(&self, code: u16) -> Option<u32> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, expire)| *expire)
    }

    /// Check whether a privilege is granted.
    pub fn contains(&self, privilege: Privilege) -> bool {
        self.get(privilege).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(code, expiry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// The earliest expiry in the table.
    pub fn earliest_expiry(&self) -> Option<u32> {
        self.entries.iter().map(|(_, expire)| *expire).min()
    }
}

impl FromIterator<(Privilege, u32)> for PrivilegeTable {
    fn from_iter<I: IntoIterator<Item = (Privilege, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (privilege, expire_at) in iter {
            table.insert(privilege, expire_at);
        }
        table
    }
}

/// Build the privilege table a role is entitled to, all expiring at `expire_at`.
pub fn build_privileges(role: Role, expire_at: u32) -> PrivilegeTable {
    role.privileges()
        .iter()
        .map(|privilege| (*privilege, expire_at))
        .collect()
}
