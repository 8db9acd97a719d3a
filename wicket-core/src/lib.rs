//! # wicket-core
//!
//! Core types and traits for the Wicket webhook event router.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! listener crates that don't need the full `wicket-std` implementation.
//!
//! # Request Flow
//!
//! 1. **Authenticate**: the caller's [`Credential`] is checked by a
//!    [`CredentialCheck`] (401 on failure).
//! 2. **Parse**: the body becomes a [`WebhookEvent`] (400 on failure).
//! 3. **Resolve**: a [`ListenerProvider`] yields the listeners whose
//!    [`Pattern`]s match the event type.
//! 4. **Dispatch**: each [`Listener`] reports an outcome on the event until
//!    the list ends or propagation is stopped.
//! 5. **Answer**: the event's best (or worst) outcome is the HTTP status.
//!
//! # Error Types
//!
//! - [`WebhookError`] - Top-level error type
//! - [`ParseError`] - Malformed body
//! - [`AuthError`] - Authentication failure
//! - [`DispatchError`] - Listener fault

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod auth;
mod dispatcher;
mod error;
mod event;
mod listener;
pub mod pattern;
mod request;
mod response;
mod router;

// Re-exports
pub use auth::{AUTHORIZATION_HEADER, Credential, CredentialCheck, DATE_HEADER};
pub use dispatcher::ListenerProvider;
pub use error::{AuthError, BoxError, DispatchError, ParseError, VariableError, WebhookError};
pub use event::{CLIENT_ERROR, NOT_FOUND, SUCCESS, WebhookEvent};
pub use listener::{Listener, SharedListener, listener_fn};
pub use pattern::Pattern;
pub use request::WebhookRequest;
pub use response::IntoOutcome;
pub use router::{EventHandlers, SELECTOR_PREFIX, selector_for};
