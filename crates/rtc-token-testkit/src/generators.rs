//! Proptest generators for property-based testing.

use proptest::prelude::*;

use rtc_token::{IssuerMode, TokenIssuer, TokenRequest};
use rtc_token_core::{AppId, PrivilegeTable, Role, UserId, MAX_PRIVILEGES};
use secrecy::SecretString;

/// Generate a 32-character app id.
pub fn app_id() -> impl Strategy<Value = AppId> {
    "[a-z0-9]{32}".prop_filter_map("valid app id", |s| AppId::new(s).ok())
}

/// Generate a channel name accepted by the channel validator.
pub fn channel_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,64}".prop_map(String::from)
}

/// Generate a non-empty app certificate.
pub fn app_certificate() -> impl Strategy<Value = String> {
    "[a-f0-9]{32}".prop_map(String::from)
}

/// Generate any user id.
pub fn user_id() -> impl Strategy<Value = UserId> {
    any::<u32>().prop_map(UserId)
}

/// Generate a role.
pub fn role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Publisher), Just(Role::Subscriber)]
}

/// Generate a privilege table with unique codes, in arbitrary order.
///
/// Codes are drawn from the full `u16` range, so unknown codes are covered.
pub fn privilege_table() -> impl Strategy<Value = PrivilegeTable> {
    prop::collection::btree_map(any::<u16>(), any::<u32>(), 0..=MAX_PRIVILEGES)
        .prop_map(|entries| entries.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|entries| {
            let mut table = PrivilegeTable::new();
            for (code, expire_at) in entries {
                table.insert_code(code, expire_at);
            }
            table
        })
}

/// Parameters for issuing a live token.
#[derive(Debug, Clone)]
pub struct TokenParams {
    pub app_id: AppId,
    pub app_certificate: String,
    pub channel_name: String,
    pub user_id: UserId,
    pub role: Role,
    pub ttl_secs: u32,
    pub now: u32,
}

impl TokenParams {
    /// A live issuer for these parameters.
    pub fn issuer(&self) -> TokenIssuer {
        let certificate = SecretString::from(self.app_certificate.clone());
        TokenIssuer::new(self.app_id.clone(), IssuerMode::from_certificate(certificate))
    }

    pub fn request(&self) -> TokenRequest {
        TokenRequest::new(self.channel_name.clone(), self.user_id, self.role)
            .ttl_secs(self.ttl_secs)
    }

    /// Issue the token these parameters describe.
    pub fn issue(&self) -> rtc_token::Result<String> {
        self.issuer().generate_token(&self.request(), self.now)
    }
}

impl Arbitrary for TokenParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            app_id(),
            app_certificate(),
            channel_name(),
            user_id(),
            role(),
            0u32..=7 * 24 * 3600, // ttl
            any::<u32>(),         // now
        )
            .prop_map(
                |(app_id, app_certificate, channel_name, user_id, role, ttl_secs, now)| {
                    TokenParams {
                        app_id,
                        app_certificate,
                        channel_name,
                        user_id,
                        role,
                        ttl_secs,
                        now,
                    }
                },
            )
            .boxed()
    }
}
