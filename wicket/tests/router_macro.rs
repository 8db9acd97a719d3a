//! Selector routing through `#[event_handlers]` and `RouteTable`.

use wicket::{
    EventRouter, HandlerRef, Listener, RegistryBuilder, RouteTable, VariableError, WebhookEvent,
    event_handlers,
    testing::CallLog,
};

mod common;
use common::event;

/// Writes balance changes to the log.
struct BalanceChangeHandler {
    log: CallLog,
}

#[event_handlers]
impl BalanceChangeHandler {
    fn event_account_balance_changed(
        &self,
        event: &mut WebhookEvent,
    ) -> Result<(), VariableError> {
        let id: i64 = event.var_as("billing_entity_id")?;
        let prev: f64 = event.var_as("prev_balance")?;
        let curr: f64 = event.var_as("curr_balance")?;
        self.log.record(format!("account {id}: {prev} -> {curr}"));
        event.report_success();
        Ok(())
    }

    fn event_customer_balance_changed(&self, event: &mut WebhookEvent) {
        self.log.record("customer");
        event.report_success();
    }

    #[on("SMS/Sent")]
    fn sms_sent(&self, event: &mut WebhookEvent) {
        self.log.record(self.describe("sms"));
        event.report_result(444);
    }

    fn describe(&self, what: &str) -> String {
        format!("{what} handled")
    }
}

fn with_balance(event_type: &str) -> WebhookEvent {
    let vars = common::variables();
    WebhookEvent::new(event_type, vars.as_object().cloned().unwrap_or_default())
}

#[test]
fn test_macro_routes_by_method_name() {
    let log = CallLog::new();
    let router = EventRouter::new(BalanceChangeHandler { log: log.clone() });

    let mut account = with_balance("Account/BalanceChanged");
    router.on_event(&mut account).unwrap();
    assert_eq!(account.best_result(), 200);

    let mut customer = with_balance("Customer/BalanceChanged");
    router.on_event(&mut customer).unwrap();
    assert_eq!(customer.best_result(), 200);

    assert_eq!(log.calls(), ["account 1234: 10.5 -> 4.25", "customer"]);
}

#[test]
fn test_macro_explicit_event_type() {
    let log = CallLog::new();
    let router = EventRouter::new(BalanceChangeHandler { log: log.clone() });

    let mut sms = event("SMS/Sent");
    router.route(&mut sms).unwrap();
    assert_eq!(sms.best_result(), 444);
    assert_eq!(log.calls(), ["sms handled"]);
}

#[test]
fn test_macro_handler_error_is_a_fault() {
    let router = EventRouter::new(BalanceChangeHandler { log: CallLog::new() });

    let mut missing = event("Account/BalanceChanged");
    let err = router.route(&mut missing).unwrap_err();
    assert!(err.to_string().contains("billing_entity_id"));
    assert!(missing.outcomes().is_empty());
}

#[test]
fn test_unknown_selector_reports_not_found() {
    let router = EventRouter::new(BalanceChangeHandler { log: CallLog::new() });
    let mut unknown = event("Routed/Unknown");
    router.route(&mut unknown).unwrap();
    assert_eq!(unknown.best_result(), 404);

    let router = router.with_not_found_code(555);
    let mut unknown = event("Routed/Unknown");
    router.route(&mut unknown).unwrap();
    assert_eq!(unknown.best_result(), 555);
}

#[test]
fn test_route_table() {
    let table = RouteTable::new()
        .on("Routed/Known", |e| e.report_result(444))
        .on("Routed/Quiet", |_| {});
    let router = EventRouter::new(table);

    let mut known = event("Routed/Known");
    router.route(&mut known).unwrap();
    assert_eq!(known.best_result(), 444);

    let mut quiet = event("Routed/Quiet");
    router.route(&mut quiet).unwrap();
    assert!(quiet.outcomes().is_empty());

    let mut unknown = event("Routed/Unknown");
    router.route(&mut unknown).unwrap();
    assert_eq!(unknown.best_result(), 404);
}

#[test]
fn test_router_registered_as_listener() {
    let log = CallLog::new();
    let registry = RegistryBuilder::new()
        .register(
            ["*/BalanceChanged"],
            [HandlerRef::listener(EventRouter::new(BalanceChangeHandler {
                log: log.clone(),
            }))],
        )
        .build();

    let dispatched = wicket::Dispatcher::new(registry)
        .dispatch(with_balance("Customer/BalanceChanged"))
        .unwrap();
    assert_eq!(dispatched.best_result(), 200);
    assert_eq!(log.calls(), ["customer"]);
}
