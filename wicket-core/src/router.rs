//! # Selector Routing
//!
//! A handler object groups one operation per event type. The operation for
//! an event is picked by its *selector*: the event type with `/` removed and
//! prefixed by `event`, so `Subscriber/Created` selects
//! `eventSubscriberCreated`.
//!
//! [`EventHandlers`] is the lookup from selector to operation. It is built
//! at setup time, either by hand (`RouteTable` in `wicket-std`) or by the
//! `#[event_handlers]` macro, and never resolves names at runtime.

use crate::{error::BoxError, event::WebhookEvent};

/// Prefix of every selector.
pub const SELECTOR_PREFIX: &str = "event";

/// Compute the selector for an event type.
pub fn selector_for(event_type: &str) -> String {
    let mut selector = String::with_capacity(SELECTOR_PREFIX.len() + event_type.len());
    selector.push_str(SELECTOR_PREFIX);
    selector.extend(event_type.chars().filter(|c| *c != '/'));
    selector
}

/// A set of operations keyed by selector.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `EventHandlers` set",
    label = "missing `EventHandlers` implementation",
    note = "Use `#[event_handlers]` on the impl block, or build a `RouteTable`."
)]
pub trait EventHandlers: Send + Sync + 'static {
    /// Run the operation for `selector`.
    ///
    /// Returns `None` when no operation has this selector.
    fn handle(&self, selector: &str, event: &mut WebhookEvent) -> Option<Result<(), BoxError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_for() {
        assert_eq!(selector_for("Subscriber/Created"), "eventSubscriberCreated");
        assert_eq!(
            selector_for("Account/BalanceChanged"),
            "eventAccountBalanceChanged"
        );
        assert_eq!(selector_for("A/B/C"), "eventABC");
        assert_eq!(selector_for(""), "event");
    }
}
