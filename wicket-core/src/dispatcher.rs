//! Listener provider core trait.

use crate::{event::WebhookEvent, listener::SharedListener};

/// A source of listeners for a given event.
///
/// This trait abstracts where listeners come from (e.g. a pattern registry
/// or a fixed list). A dispatcher walks the returned iterator in order.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid `ListenerProvider`",
    label = "missing `ListenerProvider` implementation",
    note = "Implement `ListenerProvider` to resolve listeners for an event."
)]
pub trait ListenerProvider: Send + Sync {
    /// Resolve listeners for the given event.
    ///
    /// The iterator borrows from `self` only, never from `event`, so the
    /// caller can mutate the event while walking it. It is lazy: listeners
    /// are resolved one at a time as the dispatcher asks for them.
    fn listeners_for<'a>(
        &'a self,
        event: &WebhookEvent,
    ) -> Box<dyn Iterator<Item = SharedListener> + 'a>;
}

impl ListenerProvider for Vec<SharedListener> {
    fn listeners_for<'a>(
        &'a self,
        _event: &WebhookEvent,
    ) -> Box<dyn Iterator<Item = SharedListener> + 'a> {
        Box::new(self.iter().cloned())
    }
}

impl<P: ListenerProvider + ?Sized> ListenerProvider for std::sync::Arc<P> {
    fn listeners_for<'a>(
        &'a self,
        event: &WebhookEvent,
    ) -> Box<dyn Iterator<Item = SharedListener> + 'a> {
        (**self).listeners_for(event)
    }
}
