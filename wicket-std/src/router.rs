//! Selector routing for handler objects.
//!
//! [`EventRouter`] turns a set of [`EventHandlers`] into a single
//! [`Listener`]: it computes the selector for the incoming event and runs the
//! matching operation, or reports the not-found code when there is none.

use std::{collections::HashMap, fmt};
use wicket_core::{
    BoxError, EventHandlers, IntoOutcome, Listener, NOT_FOUND, WebhookEvent, selector_for,
};

type Route = Box<dyn Fn(&mut WebhookEvent) -> Result<(), BoxError> + Send + Sync>;

/// An explicit selector → operation table, built at setup time.
///
/// # Example
/// ```ignore
/// let table = RouteTable::new()
///     .on("Account/BalanceChanged", |e| e.report_success())
///     .on("Account/Blocked", |e| e.report_result(503));
/// let router = EventRouter::new(table);
/// ```
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<String, Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `event_type` to `f`. A later route for the same selector wins.
    pub fn on<F, R>(mut self, event_type: &str, f: F) -> Self
    where
        F: Fn(&mut WebhookEvent) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.routes.insert(
            selector_for(event_type),
            Box::new(move |event: &mut WebhookEvent| f(event).into_outcome()),
        );
        self
    }

    /// Whether `selector` has an operation.
    pub fn contains(&self, selector: &str) -> bool {
        self.routes.contains_key(selector)
    }

    /// Get the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl EventHandlers for RouteTable {
    fn handle(&self, selector: &str, event: &mut WebhookEvent) -> Option<Result<(), BoxError>> {
        self.routes.get(selector).map(|route| route(event))
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.routes.keys()).finish()
    }
}

/// Dispatches an event to the operation named by its selector.
#[derive(Debug, Clone)]
pub struct EventRouter<H> {
    handlers: H,
    not_found_code: u16,
}

impl<H: EventHandlers> EventRouter<H> {
    /// Route into `handlers`, reporting 404 for unknown selectors.
    pub fn new(handlers: H) -> Self {
        Self {
            handlers,
            not_found_code: NOT_FOUND,
        }
    }

    /// Report `code` for unknown selectors.
    ///
    /// The code goes through [`WebhookEvent::report_result`], so anything at
    /// or below 400 (200 included) is recorded as 400.
    pub fn with_not_found_code(mut self, code: u16) -> Self {
        self.not_found_code = code;
        self
    }

    /// The code reported for unknown selectors.
    pub fn not_found_code(&self) -> u16 {
        self.not_found_code
    }

    /// The handler set.
    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    /// Run the operation for `event`.
    pub fn route(&self, event: &mut WebhookEvent) -> Result<(), BoxError> {
        let selector = selector_for(event.event_type());
        if let Some(result) = self.handlers.handle(&selector, event) {
            return result;
        }

        tracing::debug!(
            event_type = event.event_type(),
            %selector,
            code = self.not_found_code,
            "no handler for selector"
        );
        event.report_result(self.not_found_code);
        Ok(())
    }
}

impl<H: EventHandlers> Listener for EventRouter<H> {
    fn on_event(&self, event: &mut WebhookEvent) -> Result<(), BoxError> {
        self.route(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn event(event_type: &str) -> WebhookEvent {
        WebhookEvent::new(event_type, Map::new())
    }

    fn table() -> RouteTable {
        RouteTable::new()
            .on("Account/BalanceChanged", |e| e.report_success())
            .on("Account/Blocked", |e| e.report_result(503))
    }

    #[test]
    fn test_routes_by_selector() {
        let router = EventRouter::new(table());

        let mut changed = event("Account/BalanceChanged");
        router.route(&mut changed).unwrap();
        assert_eq!(changed.outcomes(), &[200]);

        let mut blocked = event("Account/Blocked");
        router.route(&mut blocked).unwrap();
        assert_eq!(blocked.outcomes(), &[503]);
    }

    #[test]
    fn test_not_found_defaults_to_404() {
        let router = EventRouter::new(table());
        assert_eq!(router.not_found_code(), 404);

        let mut event = event("Subscriber/Created");
        router.on_event(&mut event).unwrap();
        assert_eq!(event.outcomes(), &[404]);
    }

    #[test]
    fn test_not_found_code_configurable() {
        let mut event = event("Subscriber/Created");
        EventRouter::new(table())
            .with_not_found_code(555)
            .route(&mut event)
            .unwrap();
        assert_eq!(event.outcomes(), &[555]);

        EventRouter::new(table())
            .with_not_found_code(302)
            .route(&mut event)
            .unwrap();
        assert_eq!(event.outcomes(), &[555, 400]);
    }

    #[test]
    fn test_not_found_success_code_is_normalized() {
        let mut routed = event("Subscriber/Created");
        routed.request_stop_on_first_success();
        EventRouter::new(table())
            .with_not_found_code(200)
            .route(&mut routed)
            .unwrap();

        let mut reported = event("Subscriber/Created");
        reported.report_result(200);

        assert_eq!(routed.outcomes(), reported.outcomes());
        assert_eq!(routed.outcomes(), &[400]);
        assert!(!routed.is_propagation_stopped());
    }

    #[test]
    fn test_route_fault_propagates() {
        let table = RouteTable::new().on("A/B", |_| -> Result<(), std::io::Error> {
            Err(std::io::Error::other("boom"))
        });
        assert!(table.contains("eventAB"));
        assert_eq!(table.len(), 1);

        let err = EventRouter::new(table).route(&mut event("A/B")).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
