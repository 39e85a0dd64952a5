//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use rtc_token::{unix_now, IssuerConfig, Role, TokenClaims, TokenIssuer, TokenRequest, UserId};

/// App id used by the default fixture.
pub const FIXTURE_APP_ID: &str = "app123456789012345678901234567890";

/// Certificate used by the default fixture.
pub const FIXTURE_CERTIFICATE: &str = "cert_secret";

/// Issuance time used by fixtures with a pinned clock.
pub const FIXTURE_NOW: u32 = 1_700_000_000;

/// A test fixture with an issuer and its credentials.
pub struct TestFixture {
    pub issuer: TokenIssuer,
    pub app_id: String,
    pub certificate: String,
    /// Pinned clock; `None` uses wall-clock time.
    pub now: Option<u32>,
}

impl TestFixture {
    /// Live issuer with the default credentials and a pinned clock.
    pub fn new() -> Self {
        Self::live(FIXTURE_APP_ID, FIXTURE_CERTIFICATE)
    }

    /// Live issuer with the given credentials and a pinned clock.
    ///
    /// # Panics
    ///
    /// If `app_id` is not a valid app id.
    pub fn live(app_id: &str, certificate: &str) -> Self {
        let config = IssuerConfig::new(app_id, certificate);
        let issuer = TokenIssuer::from_config(&config).expect("fixture app id must be valid");
        Self {
            issuer,
            app_id: app_id.to_string(),
            certificate: certificate.to_string(),
            now: Some(FIXTURE_NOW),
        }
    }

    /// Issuer without a certificate, producing placeholder tokens.
    pub fn test_mode() -> Self {
        Self::live(FIXTURE_APP_ID, "")
    }

    /// Use wall-clock time instead of the pinned clock.
    pub fn with_wall_clock(mut self) -> Self {
        self.now = None;
        self
    }

    /// The time tokens are issued at.
    pub fn now(&self) -> u32 {
        self.now.unwrap_or_else(unix_now)
    }

    /// Issue a token for a channel and user.
    pub fn issue(
        &self,
        channel_name: &str,
        user_id: u32,
        role: Role,
        ttl_secs: u32,
    ) -> rtc_token::Result<String> {
        let request = TokenRequest::new(channel_name, UserId(user_id), role).ttl_secs(ttl_secs);
        self.issuer.generate_token(&request, self.now())
    }

    /// Verify a token for a channel at the fixture's clock.
    pub fn verify(&self, token: &str, channel_name: &str) -> rtc_token::Result<TokenClaims> {
        self.issuer.verify(token, channel_name, self.now())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures for distinct apps, each with its own certificate.
pub fn multi_app_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let app_id = format!("{:032x}", i + 1);
            let certificate = format!("cert_{}", i);
            TestFixture::live(&app_id, &certificate)
        })
        .collect()
}
