//! Error types for Wicket.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WebhookError`] - Top-level error type for one webhook request
//! - [`ParseError`] - The request body is not a valid event (400)
//! - [`AuthError`] - The caller failed authentication (401)
//! - [`DispatchError`] - A listener faulted during dispatch (500)
//! - [`VariableError`] - Lookup of an event variable failed

use thiserror::Error;

/// A boxed error type for listener faults.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for processing one webhook request.
///
/// Every variant maps to the HTTP status the caller should receive, see
/// [`WebhookError::status`].
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The request body could not be turned into an event.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The caller could not be authenticated.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A listener faulted while the event was dispatched.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl WebhookError {
    /// The HTTP status code carried by this error.
    pub fn status(&self) -> u16 {
        match self {
            WebhookError::Parse(e) => e.status(),
            WebhookError::Auth(e) => e.status(),
            WebhookError::Dispatch(e) => e.status(),
        }
    }
}

/// Errors raised while building an event from a request body.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The body is not decodable as JSON at all.
    #[error("can't decode request body as JSON: {source}")]
    InvalidJson {
        /// The underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The body decoded, but not to a JSON object.
    #[error("malformed event payload, expected a JSON object")]
    NotAnObject,

    /// One or both of the required top-level fields are absent.
    #[error("malformed event payload, missing field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A required field is present with the wrong JSON type.
    #[error("malformed event payload, '{field}' must be {expected}")]
    InvalidField {
        /// The offending field name.
        field: &'static str,
        /// What the field should have been.
        expected: &'static str,
    },
}

impl ParseError {
    /// Status code returned to the caller for a malformed body.
    pub const STATUS: u16 = 400;

    /// The HTTP status code carried by this error.
    pub const fn status(&self) -> u16 {
        Self::STATUS
    }
}

/// Errors raised by the authentication chain.
///
/// All variants carry the same status; the message tells them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The header is absent or given more than once.
    #[error("missed or wrong '{0}' header in the request")]
    Header(String),

    /// The credential header does not split into `<scheme> <token>`.
    #[error("corrupted content of '{0}' header in the request")]
    CorruptedHeader(String),

    /// The credential was well formed but did not match.
    #[error("{0}")]
    Rejected(&'static str),
}

impl AuthError {
    /// Status code returned to the caller on authentication failure.
    pub const STATUS: u16 = 401;

    /// The HTTP status code carried by this error.
    pub const fn status(&self) -> u16 {
        Self::STATUS
    }
}

/// Errors raised while dispatching an event to its listeners.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A listener returned an error instead of reporting an outcome.
    #[error("listener failed while handling '{event_type}'")]
    Listener {
        /// Type of the event being dispatched.
        event_type: String,
        /// The listener's error.
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Status code returned to the caller when a listener faults.
    pub const STATUS: u16 = 500;

    /// The HTTP status code carried by this error.
    pub const fn status(&self) -> u16 {
        Self::STATUS
    }
}

/// Errors raised when reading event variables.
#[derive(Error, Debug)]
pub enum VariableError {
    /// No variable with this name exists.
    #[error("event variable '{0}' does not exist")]
    Missing(String),

    /// The variable exists but does not deserialize into the requested type.
    #[error("event variable '{key}' has an unexpected shape: {source}")]
    Type {
        /// The variable name.
        key: String,
        /// The deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        let parse: WebhookError = ParseError::NotAnObject.into();
        let auth: WebhookError = AuthError::Rejected("Basic auth failed").into();
        let dispatch: WebhookError = DispatchError::Listener {
            event_type: "A/B".into(),
            source: "boom".into(),
        }
        .into();

        assert_eq!(parse.status(), 400);
        assert_eq!(auth.status(), 401);
        assert_eq!(dispatch.status(), 500);
    }

    #[test]
    fn test_messages_name_the_problem() {
        let missing = ParseError::MissingFields(vec!["event_type", "variables"]);
        assert_eq!(
            missing.to_string(),
            "malformed event payload, missing field(s): event_type, variables"
        );

        let header = AuthError::Header("Date".into());
        assert_eq!(
            header.to_string(),
            "missed or wrong 'Date' header in the request"
        );

        assert_eq!(
            AuthError::Rejected("Basic auth failed").to_string(),
            "Basic auth failed"
        );
    }
}
