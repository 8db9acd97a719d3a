//! Testing utilities for Wicket.
//!
//! This module provides utilities to make testing listeners, routers and the
//! request boundary easier.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered log of listener invocations
//! - [`RecordingListener`]: A listener that records its name and optionally reports
//! - [`ReportingListener`]: A listener that reports a fixed code
//! - [`FailingListener`]: A listener that always faults
//! - [`TestRequest`]: An in-memory [`WebhookRequest`]

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use wicket_core::{BoxError, DATE_HEADER, Listener, WebhookEvent, WebhookRequest};

// ============================================================================
// Call Log
// ============================================================================

/// An ordered record of which listeners ran.
///
/// Clones share the same log.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let a = RecordingListener::new("a", &log);
///
/// // Dispatch...
///
/// assert_eq!(log.calls(), ["a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name`.
    pub fn record(&self, name: impl Into<String>) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name.into());
    }

    /// A copy of the recorded names, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that writes its name to a [`CallLog`].
///
/// By default it reports nothing. Use [`reporting`](Self::reporting) and
/// [`stopping`](Self::stopping) to give it an outcome.
#[derive(Debug, Clone)]
pub struct RecordingListener {
    name: String,
    log: CallLog,
    report: ReportingListener,
}

impl RecordingListener {
    /// Record into `log` as `name`.
    pub fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            report: ReportingListener::silent(),
        }
    }

    /// Report `code` after recording.
    pub fn reporting(mut self, code: u16) -> Self {
        self.report.code = Some(code);
        self
    }

    /// Request stop-on-first-success after reporting.
    pub fn stopping(mut self) -> Self {
        self.report.stop = true;
        self
    }
}

impl Listener for RecordingListener {
    fn on_event(&self, event: &mut WebhookEvent) -> Result<(), BoxError> {
        self.log.record(self.name.as_str());
        self.report.on_event(event)
    }
}

// ============================================================================
// Reporting Listener
// ============================================================================

/// A listener that reports a fixed code.
///
/// `200` is reported as a success, anything else through
/// [`WebhookEvent::report_result`].
#[derive(Debug, Clone, Copy)]
pub struct ReportingListener {
    code: Option<u16>,
    stop: bool,
}

impl ReportingListener {
    /// Report `code`.
    pub fn new(code: u16) -> Self {
        Self {
            code: Some(code),
            stop: false,
        }
    }

    /// Report a success.
    pub fn success() -> Self {
        Self::new(wicket_core::SUCCESS)
    }

    /// Report nothing.
    pub fn silent() -> Self {
        Self {
            code: None,
            stop: false,
        }
    }

    /// Request stop-on-first-success after reporting.
    pub fn stopping(mut self) -> Self {
        self.stop = true;
        self
    }
}

impl Listener for ReportingListener {
    fn on_event(&self, event: &mut WebhookEvent) -> Result<(), BoxError> {
        match self.code {
            Some(wicket_core::SUCCESS) => event.report_success(),
            Some(code) => event.report_result(code),
            None => {}
        }
        if self.stop {
            event.request_stop_on_first_success();
        }
        Ok(())
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that always returns an error.
#[derive(Debug, Clone)]
pub struct FailingListener {
    message: String,
}

impl FailingListener {
    /// Fail with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Listener for FailingListener {
    fn on_event(&self, _event: &mut WebhookEvent) -> Result<(), BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Test Request
// ============================================================================

/// An in-memory request.
///
/// Header names compare case-insensitively. Repeating a header adds a value.
///
/// # Example
///
/// ```rust,ignore
/// let request = TestRequest::event("Account/BalanceChanged", json!({"i_account": 7}))
///     .basic_auth("user", "pass");
/// assert_eq!(webhook.handle(&request), 200);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestRequest {
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl TestRequest {
    /// A request with `body` and no headers.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// A request whose body is `{"event_type": .., "variables": ..}`.
    pub fn event(event_type: &str, variables: Value) -> Self {
        Self::json(&serde_json::json!({
            "event_type": event_type,
            "variables": variables,
        }))
    }

    /// A request whose body is `value` serialized.
    pub fn json(value: &Value) -> Self {
        Self::new(value.to_string())
    }

    /// Add a header value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add `Authorization: Basic ..` and `Date` headers for `login:password`.
    pub fn basic_auth(self, login: &str, password: &str) -> Self {
        let token = STANDARD.encode(format!("{login}:{password}"));
        self.header("Authorization", format!("Basic {token}"))
            .header(DATE_HEADER, "Mon, 01 Jan 2024 00:00:00 GMT")
    }
}

impl WebhookRequest for TestRequest {
    fn body(&self) -> &[u8] {
        &self.body
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    #[test]
    fn test_recording_listener() {
        let log = CallLog::new();
        let a = RecordingListener::new("a", &log);
        let b = RecordingListener::new("b", &log).reporting(503).stopping();

        let mut event = WebhookEvent::new("A/B", Map::new());
        a.on_event(&mut event).unwrap();
        b.on_event(&mut event).unwrap();

        assert_eq!(log.calls(), ["a", "b"]);
        assert_eq!(event.outcomes(), &[503]);
        assert!(!event.is_propagation_stopped());

        log.clear();
        assert_eq!(log.count(), 0);
    }

    #[test]
    fn test_reporting_listener() {
        let mut event = WebhookEvent::new("A/B", Map::new());
        ReportingListener::success()
            .stopping()
            .on_event(&mut event)
            .unwrap();
        assert!(event.is_propagation_stopped());

        ReportingListener::new(302).on_event(&mut event).unwrap();
        assert_eq!(event.outcomes(), &[200, 400]);
    }

    #[test]
    fn test_failing_listener() {
        let mut event = WebhookEvent::new("A/B", Map::new());
        let err = FailingListener::new("nope").on_event(&mut event).unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn test_request_headers() {
        let request = TestRequest::event("A/B", json!({"k": 1}))
            .header("X-Test", "one")
            .header("x-test", "two");

        assert_eq!(request.header_values("X-TEST"), ["one", "two"]);
        assert!(request.header_values("Date").is_empty());

        let event = WebhookEvent::from_request(&request).unwrap();
        assert_eq!(event.event_type(), "A/B");
        assert_eq!(event.var("k").unwrap(), &json!(1));
    }

    #[test]
    fn test_basic_auth_headers() {
        let request = TestRequest::new("{}").basic_auth("user", "pass");
        assert_eq!(request.header_values("authorization"), ["Basic dXNlcjpwYXNz"]);
        assert_eq!(request.header_values("date").len(), 1);
    }
}
