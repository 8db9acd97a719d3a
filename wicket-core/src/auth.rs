//! Shared-secret credentials.
//!
//! A webhook sender proves its identity with a single header of the form
//! `<scheme> <token>`. This module holds the parsed [`Credential`] and the
//! [`CredentialCheck`] seam that decides whether it is acceptable. Header
//! extraction itself lives with the authenticator in `wicket-std`.

use crate::error::AuthError;

/// Default credential header.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Header that must accompany every authenticated request.
pub const DATE_HEADER: &str = "Date";

/// A `(scheme, token)` pair taken from the credential header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    scheme: String,
    token: String,
}

impl Credential {
    /// Create a credential from its parts.
    pub fn new(scheme: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            token: token.into(),
        }
    }

    /// Split the value of `header` on single spaces into exactly two parts.
    pub fn parse(header: &str, value: &str) -> Result<Self, AuthError> {
        let mut parts = value.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) => Ok(Self::new(scheme, token)),
            _ => Err(AuthError::CorruptedHeader(header.to_owned())),
        }
    }

    /// The scheme, e.g. `Basic`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The token following the scheme.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Decides whether a credential is acceptable.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `CredentialCheck`",
    label = "missing `CredentialCheck` implementation",
    note = "Implement `check` to compare the credential against the expected secret."
)]
pub trait CredentialCheck: Send + Sync {
    /// Accept or reject `credential`.
    fn check(&self, credential: &Credential) -> Result<(), AuthError>;
}

impl CredentialCheck for Box<dyn CredentialCheck> {
    fn check(&self, credential: &Credential) -> Result<(), AuthError> {
        (**self).check(credential)
    }
}
