//! Webhook endpoint configuration.
//!
//! ```json
//! {
//!     "auth": { "kind": "basic", "login": "user", "password": "pass" },
//!     "auth_header": "Authorization",
//!     "not_found_code": 404,
//!     "result": "best"
//! }
//! ```

use crate::auth::{Authenticator, BasicAuth, BoxAuthenticator, CustomAuth};
use serde::Deserialize;
use thiserror::Error;
use wicket_core::{AUTHORIZATION_HEADER, NOT_FOUND, WebhookEvent};

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Not valid JSON, or not the expected shape.
    #[error("invalid webhook configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Which credential check to apply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AuthConfig {
    /// `Authorization: Basic base64(login:password)`.
    Basic {
        /// Expected login.
        login: String,
        /// Expected password.
        password: String,
    },
    /// `Authorization: <scheme> <token>`, matched exactly.
    Custom {
        /// Expected scheme.
        scheme: String,
        /// Expected token.
        token: String,
    },
}

/// How the HTTP status is picked from an event's outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultPolicy {
    /// The smallest reported code.
    #[default]
    Best,
    /// The largest reported code.
    Worst,
}

impl ResultPolicy {
    /// Pick the status for `event`, or `not_found` when nothing reported.
    pub fn select(self, event: &WebhookEvent, not_found: u16) -> u16 {
        match self {
            Self::Best => event.best_result_or(not_found),
            Self::Worst => event.worst_result_or(not_found),
        }
    }
}

/// Settings for one webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookConfig {
    /// Credential check.
    pub auth: AuthConfig,
    /// Header carrying the credential.
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    /// Status when no listener reported an outcome.
    #[serde(default = "default_not_found_code")]
    pub not_found_code: u16,
    /// Status selection policy.
    #[serde(default)]
    pub result: ResultPolicy,
}

fn default_auth_header() -> String {
    AUTHORIZATION_HEADER.to_owned()
}

fn default_not_found_code() -> u16 {
    NOT_FOUND
}

impl WebhookConfig {
    /// Configuration with the given check and every other field defaulted.
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            auth_header: default_auth_header(),
            not_found_code: default_not_found_code(),
            result: ResultPolicy::default(),
        }
    }

    /// Parse configuration from JSON.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build the configured authenticator.
    pub fn authenticator(&self) -> BoxAuthenticator {
        let authenticator = match &self.auth {
            AuthConfig::Basic { login, password } => {
                Authenticator::new(BasicAuth::new(login, password)).boxed()
            }
            AuthConfig::Custom { scheme, token } => {
                Authenticator::new(CustomAuth::new(scheme.as_str(), token.as_str())).boxed()
            }
        };
        authenticator.with_auth_header(self.auth_header.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestRequest;
    use serde_json::{Map, json};

    #[test]
    fn test_defaults() {
        let source = r#"{"auth": {"kind": "basic", "login": "u", "password": "p"}}"#;
        let config = WebhookConfig::from_json(source).unwrap();
        let expected = WebhookConfig::new(AuthConfig::Basic {
            login: "u".into(),
            password: "p".into(),
        });
        assert_eq!(config, expected);
        assert_eq!(config.auth_header, "Authorization");
        assert_eq!(config.not_found_code, 404);
        assert_eq!(config.result, ResultPolicy::Best);
    }

    #[test]
    fn test_custom_auth_config() {
        let config = WebhookConfig::from_json(
            r#"{
                "auth": {"kind": "custom", "scheme": "Token", "token": "s3cr3t"},
                "auth_header": "X-Signature",
                "not_found_code": 200,
                "result": "worst"
            }"#,
        )
        .unwrap();
        assert_eq!(config.not_found_code, 200);
        assert_eq!(config.result, ResultPolicy::Worst);

        let authenticator = config.authenticator();
        assert_eq!(authenticator.auth_header(), "X-Signature");

        let request = TestRequest::event("A/B", json!({}))
            .header("X-Signature", "Token s3cr3t")
            .header("Date", "some date string");
        assert!(authenticator.authenticate(&request).is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let err = WebhookConfig::from_json(r#"{"auth": {"kind": "digest"}}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid webhook configuration"));
        assert!(WebhookConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_result_policy() {
        let mut event = WebhookEvent::new("A/B", Map::new());
        assert_eq!(ResultPolicy::Best.select(&event, 404), 404);

        event.report_result(404);
        event.report_result(501);
        event.report_success();
        event.report_result(444);
        assert_eq!(ResultPolicy::Best.select(&event, 404), 200);
        assert_eq!(ResultPolicy::Worst.select(&event, 404), 501);
    }
}
