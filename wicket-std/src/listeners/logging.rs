//! Logging listener for event observation.

use wicket_core::{BoxError, Listener, WebhookEvent};

/// A listener that logs events for debugging/observation.
///
/// It reports no outcome, so it never changes the response.
#[derive(Debug, Clone)]
pub struct LoggingListener {
    name: &'static str,
}

impl LoggingListener {
    /// Create a logging listener tagged with `name`.
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new("webhook")
    }
}

impl Listener for LoggingListener {
    fn on_event(&self, event: &mut WebhookEvent) -> Result<(), BoxError> {
        tracing::debug!(
            listener = self.name,
            event_type = event.event_type(),
            variables = %serde_json::Value::Object(event.variables().clone()),
            "received event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reports_nothing() {
        let vars = json!({"i_account": 7});
        let mut event = WebhookEvent::new("Account/Blocked", vars.as_object().cloned().unwrap());
        LoggingListener::default().on_event(&mut event).unwrap();
        assert!(event.outcomes().is_empty());
    }
}
