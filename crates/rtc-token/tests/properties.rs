//! Property tests over the issuer.

use proptest::prelude::*;

use rtc_token::core::{decode_content, decode_token_with};
use rtc_token::{is_test_token, IssuerError, IssuerMode, Privilege, Role, TokenIssuer};
use rtc_token_testkit::generators::{channel_name, user_id, TokenParams};

proptest! {
    #[test]
    fn test_issue_deterministic(params: TokenParams) {
        prop_assert_eq!(params.issue().unwrap(), params.issue().unwrap());
    }

    #[test]
    fn test_token_carries_prefix_and_user(params: TokenParams) {
        let token = params.issue().unwrap();
        let prefix = format!("006{}", params.app_id);
        prop_assert!(token.starts_with(&prefix));
        prop_assert!(!is_test_token(&token));

        let decoded = decode_token_with(&token, params.app_id.len()).unwrap();
        let (signature, uid, _) = decode_content(&decoded.content).unwrap();
        prop_assert_eq!(signature.len(), 32);
        prop_assert_eq!(uid, params.user_id);
    }

    #[test]
    fn test_publisher_grants_all_subscriber_grants_join(params: TokenParams) {
        let claims = params.issuer().inspect(&params.issue().unwrap()).unwrap();
        match params.role {
            Role::Publisher => {
                for p in Privilege::ALL {
                    prop_assert!(claims.privileges.contains(p));
                }
            }
            Role::Subscriber => {
                prop_assert_eq!(claims.privileges.len(), 1);
                prop_assert!(claims.privileges.contains(Privilege::JoinChannel));
            }
        }
    }

    #[test]
    fn test_signature_binds_channel(params in any::<TokenParams>(), other in channel_name()) {
        prop_assume!(other != params.channel_name);

        let token = params.issue().unwrap();
        let result = params.issuer().verify(&token, &other, params.now);
        prop_assert!(matches!(result, Err(IssuerError::SignatureMismatch)));
    }

    #[test]
    fn test_placeholder_format(channel in channel_name(), uid in user_id()) {
        let issuer = TokenIssuer::new(
            rtc_token::AppId::new("0123456789abcdef0123456789abcdef").unwrap(),
            IssuerMode::Test,
        );
        let request = rtc_token::TokenRequest::new(channel.clone(), uid, Role::Publisher);
        let token = issuer.generate_token(&request, 0).unwrap();
        prop_assert_eq!(token, format!("test_token_{}_{}", channel, uid));
    }
}
