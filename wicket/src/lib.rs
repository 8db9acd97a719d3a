//! # wicket - Webhook Event Router
//!
//! `wicket` receives authenticated webhook calls, turns each body into a
//! [`WebhookEvent`], and runs it through the listeners registered for its
//! event type. The HTTP status comes from the outcomes those listeners report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wicket::prelude::*;
//!
//! struct AccountHandlers;
//!
//! #[event_handlers]
//! impl AccountHandlers {
//!     fn event_account_balance_changed(&self, event: &mut WebhookEvent) {
//!         event.report_success();
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register(["Account/*"], [HandlerRef::listener(EventRouter::new(AccountHandlers))])
//!     .build();
//! let webhook = Webhook::new(Authenticator::basic("user", "pass"), Dispatcher::new(registry));
//!
//! let status = webhook.handle(&request);
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod webhook;

pub use webhook::Webhook;

pub use wicket_core::{
    // Authentication
    AUTHORIZATION_HEADER,
    // Error types
    AuthError,
    BoxError,
    // Status codes
    CLIENT_ERROR,
    Credential,
    CredentialCheck,
    DATE_HEADER,
    DispatchError,
    // Routing
    EventHandlers,
    // Response
    IntoOutcome,
    // Listener
    Listener,
    ListenerProvider,
    NOT_FOUND,
    ParseError,
    // Pattern
    Pattern,
    SELECTOR_PREFIX,
    SUCCESS,
    SharedListener,
    VariableError,
    WebhookError,
    // Event
    WebhookEvent,
    WebhookRequest,
    listener_fn,
    pattern::matches,
    selector_for,
};

pub use wicket_std::{
    AuthConfig, Authenticator, BasicAuth, BoxAuthenticator, ConfigError, CustomAuth, Dispatcher,
    EventRouter, HandlerRef, HandlerResolver, LoggingListener, MapResolver, NoopResolver,
    Registration, Registry, RegistryBuilder, ResultPolicy, RouteTable, WebhookConfig,
};

/// Standard listener implementations.
pub mod listeners {
    pub use wicket_std::listeners::LoggingListener;
}

/// Testing utilities.
pub mod testing {
    pub use wicket_std::testing::{
        CallLog, FailingListener, RecordingListener, ReportingListener, TestRequest,
    };
}

/// Prelude module - common imports for Wicket.
///
/// # Usage
///
/// ```rust,ignore
/// use wicket::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Authentication
        Authenticator,
        // Errors
        BoxError,
        // Dispatch
        Dispatcher,
        // Routing
        EventHandlers,
        EventRouter,
        HandlerRef,
        // Response
        IntoOutcome,
        // Core traits
        Listener,
        RegistryBuilder,
        RouteTable,
        Webhook,
        WebhookError,
        WebhookEvent,
        WebhookRequest,
        listener_fn,
    };

    #[cfg(feature = "macros")]
    pub use crate::event_handlers;
}

#[cfg(feature = "macros")]
pub use wicket_macros::event_handlers;
