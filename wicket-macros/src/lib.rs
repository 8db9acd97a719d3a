//! Procedural macros for Wicket.

use proc_macro::TokenStream;

mod handlers;

/// Implement `EventHandlers` for an inherent `impl` block.
///
/// Every method named `event_<snake_case>` is routed under the selector
/// `event<PascalCase>`. Use `#[on("Type/Name")]` when the event type does not
/// survive the snake case round trip. Routed methods take `&self` and
/// `&mut WebhookEvent` and return `()` or a `Result<(), E>`.
///
/// ```rust,ignore
/// struct BalanceHandlers;
///
/// #[event_handlers]
/// impl BalanceHandlers {
///     fn event_account_balance_changed(&self, event: &mut WebhookEvent) {
///         event.report_success();
///     }
///
///     #[on("SMS/Sent")]
///     fn sms_sent(&self, event: &mut WebhookEvent) {
///         event.report_success();
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn event_handlers(attr: TokenStream, item: TokenStream) -> TokenStream {
    handlers::event_handlers_impl(attr, item)
}
