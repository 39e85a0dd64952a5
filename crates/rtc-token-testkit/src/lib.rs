//! # RTC Token Testkit
//!
//! Testing utilities for the RTC token crates.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed inputs with the exact signature and content
//!   bytes the remote verifier expects
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: ready-made issuers for live and test mode
//!
//! ## Golden Vectors
//!
//! Content bytes are pinned before compression, since the zlib stream
//! itself may differ between deflate backends while inflating identically.
//!
//! ```rust
//! use rtc_token_testkit::vectors::{all_vectors, content_from_vector};
//!
//! for vector in all_vectors() {
//!     let content = content_from_vector(&vector).unwrap();
//!     assert_eq!(hex::encode(content), vector.expected_content);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use rtc_token_testkit::generators::TokenParams;
//!
//! proptest! {
//!     #[test]
//!     fn issued_tokens_inspect_back(params: TokenParams) {
//!         let token = params.issue().unwrap();
//!         prop_assert_eq!(params.issuer().inspect(&token).unwrap().user_id, params.user_id);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use rtc_token_testkit::fixtures::TestFixture;
//! use rtc_token::Role;
//!
//! let fixture = TestFixture::new();
//! let token = fixture.issue("consultation_abc", 42, Role::Publisher, 3600).unwrap();
//! assert!(token.starts_with("006"));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_app_fixtures, TestFixture};
pub use generators::TokenParams;
pub use vectors::{all_vectors, content_from_vector, verify_all_vectors, GoldenVector};
