//! # Listeners
//!
//! A [`Listener`] consumes an event and reports an outcome on it with
//! [`WebhookEvent::report_success`] or [`WebhookEvent::report_result`].
//!
//! Any `Fn(&mut WebhookEvent)` returning `()` or `Result<(), E>` is a
//! listener. Returning an error is a fault, not an outcome: dispatch stops and
//! the error reaches the request boundary. Listeners that can fail in an
//! expected way should report a code instead.
//!
//! [`WebhookEvent::report_success`]: crate::WebhookEvent::report_success
//! [`WebhookEvent::report_result`]: crate::WebhookEvent::report_result

use crate::{error::BoxError, event::WebhookEvent, response::IntoOutcome};
use std::sync::Arc;

/// An invocable unit that handles events.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener`",
    label = "missing `Listener` implementation",
    note = "Listeners must implement `on_event`, or be a `Fn(&mut WebhookEvent)` closure."
)]
pub trait Listener: Send + Sync + 'static {
    /// Handle `event`.
    fn on_event(&self, event: &mut WebhookEvent) -> Result<(), BoxError>;
}

impl<F, R> Listener for F
where
    F: Fn(&mut WebhookEvent) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn on_event(&self, event: &mut WebhookEvent) -> Result<(), BoxError> {
        self(event).into_outcome()
    }
}

/// A reference-counted, type-erased listener.
pub type SharedListener = Arc<dyn Listener>;

/// Wrap a closure as a [`SharedListener`].
///
/// Exists so closure argument types are inferred without annotations.
pub fn listener_fn<F, R>(f: F) -> SharedListener
where
    F: Fn(&mut WebhookEvent) -> R + Send + Sync + 'static,
    R: IntoOutcome + 'static,
{
    Arc::new(f)
}
