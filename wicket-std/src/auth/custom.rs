use std::fmt;
use wicket_core::{AuthError, Credential, CredentialCheck};

/// A fixed scheme and token, both compared exactly.
#[derive(Clone)]
pub struct CustomAuth {
    scheme: String,
    token: String,
}

impl CustomAuth {
    /// Expect `<scheme> <token>`.
    pub fn new(scheme: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            token: token.into(),
        }
    }

    /// The expected scheme.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

impl CredentialCheck for CustomAuth {
    fn check(&self, credential: &Credential) -> Result<(), AuthError> {
        if credential.scheme() != self.scheme || credential.token() != self.token {
            return Err(AuthError::Rejected("Custom auth failed"));
        }
        Ok(())
    }
}

impl fmt::Debug for CustomAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAuth")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}
