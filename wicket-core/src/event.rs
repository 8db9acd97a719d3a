//! # The Webhook Event
//!
//! A [`WebhookEvent`] is built once per inbound request from its JSON body:
//!
//! ```json
//! {"event_type": "Account/BalanceChanged", "variables": {"i_account": 42}}
//! ```
//!
//! The type and variables are read-only. What changes while the event travels
//! through its listeners is the outcome ledger: every listener reports a
//! status code with [`report_success`] or [`report_result`], and the caller
//! answers the webhook with [`best_result`] or [`worst_result`].
//!
//! A listener may also ask for the remaining listeners to be skipped once any
//! success has been recorded, see [`request_stop_on_first_success`].
//!
//! [`report_success`]: WebhookEvent::report_success
//! [`report_result`]: WebhookEvent::report_result
//! [`best_result`]: WebhookEvent::best_result
//! [`worst_result`]: WebhookEvent::worst_result
//! [`request_stop_on_first_success`]: WebhookEvent::request_stop_on_first_success

use crate::{
    error::{ParseError, VariableError},
    pattern,
    request::WebhookRequest,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Outcome code of a successfully handled event.
pub const SUCCESS: u16 = 200;

/// Lowest outcome code stored for a failure.
pub const CLIENT_ERROR: u16 = 400;

/// Result reported when no listener recorded anything.
pub const NOT_FOUND: u16 = 404;

const EVENT_TYPE_KEY: &str = "event_type";
const VARIABLES_KEY: &str = "variables";

/// One inbound event and the outcomes its listeners reported.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    event_type: String,
    variables: Map<String, Value>,
    stop_on_first_success: bool,
    outcomes: Vec<u16>,
}

impl WebhookEvent {
    /// Create an event directly from its parts.
    pub fn new(event_type: impl Into<String>, variables: Map<String, Value>) -> Self {
        Self {
            event_type: event_type.into(),
            variables,
            stop_on_first_success: false,
            outcomes: Vec::new(),
        }
    }

    /// Parse an event from a raw JSON body.
    ///
    /// The body must be an object with a string `event_type` and an object
    /// `variables`. Other top-level fields are ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, ParseError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|source| ParseError::InvalidJson { source })?;
        let Value::Object(mut payload) = value else {
            return Err(ParseError::NotAnObject);
        };

        let missing: Vec<&'static str> = [EVENT_TYPE_KEY, VARIABLES_KEY]
            .into_iter()
            .filter(|key| !payload.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ParseError::MissingFields(missing));
        }

        let Some(Value::String(event_type)) = payload.remove(EVENT_TYPE_KEY) else {
            return Err(ParseError::InvalidField {
                field: EVENT_TYPE_KEY,
                expected: "a string",
            });
        };
        let Some(Value::Object(variables)) = payload.remove(VARIABLES_KEY) else {
            return Err(ParseError::InvalidField {
                field: VARIABLES_KEY,
                expected: "an object",
            });
        };

        Ok(Self::new(event_type, variables))
    }

    /// Parse an event from the body of `request`.
    pub fn from_request<R: WebhookRequest + ?Sized>(request: &R) -> Result<Self, ParseError> {
        Self::from_body(request.body())
    }

    /// The event type, e.g. `Account/BalanceChanged`.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// All event variables.
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Read one variable.
    pub fn var(&self, key: &str) -> Result<&Value, VariableError> {
        self.variables
            .get(key)
            .ok_or_else(|| VariableError::Missing(key.to_owned()))
    }

    /// Read one variable and deserialize it into `T`.
    pub fn var_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, VariableError> {
        let value = self.var(key)?;
        T::deserialize(value).map_err(|source| VariableError::Type {
            key: key.to_owned(),
            source,
        })
    }

    /// Whether a variable named `key` exists.
    pub fn has(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Record a successful outcome.
    pub fn report_success(&mut self) {
        self.outcomes.push(SUCCESS);
    }

    /// Record a failed outcome.
    ///
    /// Codes above 400 are stored as given; anything else is stored as 400,
    /// so the ledger only ever holds 200 or codes above 400.
    ///
    /// Codes are HTTP statuses and therefore `u16`: negative codes cannot be
    /// passed at all, and every code from 401 to `u16::MAX` is kept verbatim.
    pub fn report_result(&mut self, code: u16) {
        self.outcomes
            .push(if code > CLIENT_ERROR { code } else { CLIENT_ERROR });
    }

    /// Skip the remaining listeners once a success has been recorded.
    pub fn request_stop_on_first_success(&mut self) -> &mut Self {
        self.stop_on_first_success = true;
        self
    }

    /// Whether dispatch should stop before the next listener.
    pub fn is_propagation_stopped(&self) -> bool {
        self.stop_on_first_success && self.outcomes.contains(&SUCCESS)
    }

    /// Every outcome reported so far, in report order.
    pub fn outcomes(&self) -> &[u16] {
        &self.outcomes
    }

    /// The lowest reported code, or 404 when nothing was reported.
    pub fn best_result(&self) -> u16 {
        self.best_result_or(NOT_FOUND)
    }

    /// The lowest reported code, or `not_found` when nothing was reported.
    pub fn best_result_or(&self, not_found: u16) -> u16 {
        self.outcomes.iter().copied().min().unwrap_or(not_found)
    }

    /// The highest reported code, or 404 when nothing was reported.
    pub fn worst_result(&self) -> u16 {
        self.worst_result_or(NOT_FOUND)
    }

    /// The highest reported code, or `not_found` when nothing was reported.
    pub fn worst_result_or(&self, not_found: u16) -> u16 {
        self.outcomes.iter().copied().max().unwrap_or(not_found)
    }

    /// Whether the event type matches any of `patterns`.
    pub fn matches_any<P: AsRef<str>>(&self, patterns: &[P]) -> bool {
        patterns
            .iter()
            .any(|p| pattern::matches(&self.event_type, p.as_ref()))
    }
}
