//! Request authentication.
//!
//! Every check follows the same chain:
//!
//! 1. the credential header (default `Authorization`) must be present exactly once;
//! 2. its value must split on a space into `<scheme> <token>`;
//! 3. the `Date` header must be present exactly once and not be blank (its value
//!    is not otherwise inspected);
//! 4. a [`CredentialCheck`] compares the credential against the expected secret.
//!
//! Any failure is an [`AuthError`] carrying status 401. On success the request
//! is handed back untouched.

mod basic;
mod custom;

pub use basic::BasicAuth;
pub use custom::CustomAuth;

use wicket_core::{
    AUTHORIZATION_HEADER, AuthError, Credential, CredentialCheck, DATE_HEADER, WebhookRequest,
};

/// An authenticator whose check is chosen at runtime.
pub type BoxAuthenticator = Authenticator<Box<dyn CredentialCheck>>;

/// Header-based shared secret authentication.
#[derive(Debug, Clone)]
pub struct Authenticator<C> {
    check: C,
    auth_header: String,
}

impl<C: CredentialCheck> Authenticator<C> {
    /// Authenticate with `check`, reading the `Authorization` header.
    pub fn new(check: C) -> Self {
        Self {
            check,
            auth_header: AUTHORIZATION_HEADER.to_owned(),
        }
    }

    /// Read the credential from `header` instead of `Authorization`.
    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = header.into();
        self
    }

    /// The header the credential is read from.
    pub fn auth_header(&self) -> &str {
        &self.auth_header
    }

    /// The credential check.
    pub fn credential_check(&self) -> &C {
        &self.check
    }

    /// Authenticate `request`, handing it back unchanged on success.
    pub fn authenticate<'r, R>(&self, request: &'r R) -> Result<&'r R, AuthError>
    where
        R: WebhookRequest + ?Sized,
    {
        let value = single_header(request, &self.auth_header)?;
        let credential = Credential::parse(&self.auth_header, value)?;
        if single_header(request, DATE_HEADER)?.trim().is_empty() {
            return Err(AuthError::Header(DATE_HEADER.to_owned()));
        }

        if let Err(error) = self.check.check(&credential) {
            tracing::warn!(scheme = credential.scheme(), %error, "credential rejected");
            return Err(error);
        }
        Ok(request)
    }
}

impl Authenticator<BasicAuth> {
    /// Basic authentication against `login` and `password`.
    pub fn basic(login: &str, password: &str) -> Self {
        Self::new(BasicAuth::new(login, password))
    }
}

impl Authenticator<CustomAuth> {
    /// Exact-match authentication against a fixed scheme and token.
    pub fn custom(scheme: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(CustomAuth::new(scheme, token))
    }
}

impl<C: CredentialCheck + 'static> Authenticator<C> {
    /// Erase the check type.
    pub fn boxed(self) -> BoxAuthenticator {
        Authenticator {
            check: Box::new(self.check),
            auth_header: self.auth_header,
        }
    }
}

fn single_header<'r, R>(request: &'r R, name: &str) -> Result<&'r str, AuthError>
where
    R: WebhookRequest + ?Sized,
{
    match request.header_values(name).as_slice() {
        [value] => Ok(*value),
        _ => Err(AuthError::Header(name.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestRequest;

    /// Accepts anything, to exercise the header chain on its own.
    struct AllowAll;

    impl CredentialCheck for AllowAll {
        fn check(&self, _credential: &Credential) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn request() -> TestRequest {
        TestRequest::event("One/Two", serde_json::json!({}))
    }

    #[test]
    fn test_missing_auth_header() {
        let err = Authenticator::new(AllowAll)
            .authenticate(&request())
            .unwrap_err();
        assert_eq!(err, AuthError::Header("Authorization".into()));
        assert_eq!(err.status(), 401);
        assert_eq!(
            err.to_string(),
            "missed or wrong 'Authorization' header in the request"
        );
    }

    #[test]
    fn test_repeated_auth_header() {
        let request = request()
            .header("Authorization", "Basic one")
            .header("authorization", "Basic two")
            .header("Date", "some date string");
        let err = Authenticator::new(AllowAll)
            .authenticate(&request)
            .unwrap_err();
        assert_eq!(err, AuthError::Header("Authorization".into()));
    }

    #[test]
    fn test_corrupted_auth_header() {
        let request = request().header("Authorization", "SingleLine");
        let err = Authenticator::new(AllowAll)
            .authenticate(&request)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "corrupted content of 'Authorization' header in the request"
        );
    }

    #[test]
    fn test_missing_date() {
        let request = request().header("Authorization", "Basic credentials");
        let err = Authenticator::new(AllowAll)
            .authenticate(&request)
            .unwrap_err();
        assert_eq!(err, AuthError::Header("Date".into()));
        assert!(err.to_string().contains("'Date'"));
    }

    #[test]
    fn test_blank_date_rejected() {
        for date in ["", "   "] {
            let request = request()
                .header("Authorization", "Basic credentials")
                .header("Date", date);
            let err = Authenticator::new(AllowAll)
                .authenticate(&request)
                .unwrap_err();
            assert_eq!(err, AuthError::Header("Date".into()), "{date:?}");
        }
    }

    #[test]
    fn test_success_returns_request() {
        let request = request()
            .header("Authorization", "Basic credentials")
            .header("Date", "some date string");
        let authenticated = Authenticator::new(AllowAll).authenticate(&request).unwrap();
        assert!(std::ptr::eq(authenticated, &request));
    }

    #[test]
    fn test_custom_header_name() {
        let authenticator = Authenticator::new(AllowAll).with_auth_header("UserTest");
        assert_eq!(authenticator.auth_header(), "UserTest");

        let request = request()
            .header("UserTest", "Basic credentials")
            .header("Date", "some date string");
        assert!(authenticator.authenticate(&request).is_ok());

        let request = self::request()
            .header("Authorization", "Basic credentials")
            .header("Date", "some date string");
        assert_eq!(
            authenticator.authenticate(&request).unwrap_err(),
            AuthError::Header("UserTest".into())
        );
    }

    #[test]
    fn test_boxed_keeps_header() {
        let authenticator = Authenticator::basic("user", "pass")
            .with_auth_header("Verify")
            .boxed();
        assert_eq!(authenticator.auth_header(), "Verify");

        let request = request()
            .header("Verify", "Basic dXNlcjpwYXNz")
            .header("Date", "some date string");
        assert!(authenticator.authenticate(&request).is_ok());
    }
}
