//! Sequential event dispatch.

use wicket_core::{DispatchError, ListenerProvider, WebhookEvent};

/// Runs an event through the listeners its provider resolves for it.
///
/// Listeners run one after another in provider order. Before each one the
/// dispatcher checks [`WebhookEvent::is_propagation_stopped`]; once it is
/// true, the remaining listeners are skipped. The listener whose success
/// triggered the stop is therefore the last one invoked.
///
/// A listener error ends dispatch immediately and is returned as
/// [`DispatchError::Listener`]. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Dispatcher<P> {
    provider: P,
}

impl<P: ListenerProvider> Dispatcher<P> {
    /// Create a dispatcher over `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The listener provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Dispatch `event` and hand it back with its outcomes recorded.
    pub fn dispatch(&self, mut event: WebhookEvent) -> Result<WebhookEvent, DispatchError> {
        self.dispatch_mut(&mut event)?;
        Ok(event)
    }

    /// Dispatch an event in place.
    pub fn dispatch_mut(&self, event: &mut WebhookEvent) -> Result<(), DispatchError> {
        tracing::debug!(event_type = event.event_type(), "dispatching event");

        let mut invoked = 0usize;
        for listener in self.provider.listeners_for(event) {
            if event.is_propagation_stopped() {
                tracing::debug!(
                    event_type = event.event_type(),
                    invoked,
                    "propagation stopped after first success"
                );
                return Ok(());
            }

            tracing::trace!(event_type = event.event_type(), index = invoked, "invoking listener");
            listener
                .on_event(event)
                .map_err(|source| DispatchError::Listener {
                    event_type: event.event_type().to_owned(),
                    source,
                })?;
            invoked += 1;
        }

        tracing::debug!(
            event_type = event.event_type(),
            invoked,
            outcomes = ?event.outcomes(),
            "dispatch finished"
        );
        Ok(())
    }
}
