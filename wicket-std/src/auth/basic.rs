use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;
use wicket_core::{AuthError, Credential, CredentialCheck};

const BASIC_SCHEME: &str = "Basic";

/// HTTP Basic credentials: scheme `Basic`, token `base64(login:password)`.
#[derive(Clone)]
pub struct BasicAuth {
    login: String,
    token: String,
}

impl BasicAuth {
    /// Expect `login` and `password`.
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            login: login.to_owned(),
            token: STANDARD.encode(format!("{login}:{password}")),
        }
    }

    /// The expected login.
    pub fn login(&self) -> &str {
        &self.login
    }
}

impl CredentialCheck for BasicAuth {
    fn check(&self, credential: &Credential) -> Result<(), AuthError> {
        if credential.scheme() != BASIC_SCHEME || credential.token() != self.token {
            return Err(AuthError::Rejected("Basic auth failed"));
        }
        Ok(())
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}
