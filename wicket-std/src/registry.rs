//! Pattern registry for listener management.
//!
//! This module provides a builder for registering `(patterns → handlers)`
//! pairs and a frozen registry for immutable, thread-safe lookup.
//!
//! The registry is assembled once at startup. [`RegistryBuilder::build`]
//! consumes the builder, so a built [`Registry`] cannot change while events
//! are being dispatched through it.

use crate::resolver::{HandlerResolver, NoopResolver};
use std::{fmt, sync::Arc};
use wicket_core::{
    IntoOutcome, Listener, ListenerProvider, Pattern, SharedListener, WebhookEvent, listener_fn,
};

/// One entry in a registration's handler list.
#[derive(Clone)]
pub enum HandlerRef {
    /// A listener that can be invoked directly.
    Listener(SharedListener),
    /// An opaque name handed to the registry's [`HandlerResolver`].
    Descriptor(String),
}

impl HandlerRef {
    /// Wrap a listener.
    pub fn listener<L: Listener>(listener: L) -> Self {
        Self::Listener(Arc::new(listener))
    }

    /// Wrap a closure.
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(&mut WebhookEvent) -> R + Send + Sync + 'static,
        R: IntoOutcome + 'static,
    {
        Self::Listener(listener_fn(f))
    }

    /// Refer to a handler by name, resolved at lookup time.
    pub fn descriptor(name: impl Into<String>) -> Self {
        Self::Descriptor(name.into())
    }
}

impl From<SharedListener> for HandlerRef {
    fn from(listener: SharedListener) -> Self {
        Self::Listener(listener)
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listener(_) => f.write_str("Listener(..)"),
            Self::Descriptor(name) => f.debug_tuple("Descriptor").field(name).finish(),
        }
    }
}

/// Patterns and the handlers to run when any of them matches.
#[derive(Debug, Clone)]
pub struct Registration {
    patterns: Vec<Pattern>,
    handlers: Vec<HandlerRef>,
}

impl Registration {
    /// The patterns, in registration order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// The handlers, in invocation order.
    pub fn handlers(&self) -> &[HandlerRef] {
        &self.handlers
    }

    /// Whether any pattern matches `event_type`.
    pub fn matches(&self, event_type: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(event_type))
    }
}

// ============================================================================
// RegistryBuilder - for constructing registries
// ============================================================================

/// Builder for constructing a [`Registry`].
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new()
///     .register(["*/BalanceChanged"], [HandlerRef::listener(balance)])
///     .register(["Subscriber/*"], [HandlerRef::descriptor("subscribers")])
///     .with_resolver(container)
///     .build();
/// ```
pub struct RegistryBuilder<R = NoopResolver> {
    registrations: Vec<Registration>,
    resolver: R,
}

impl RegistryBuilder {
    /// Create a new empty builder using [`NoopResolver`].
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            resolver: NoopResolver,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RegistryBuilder<R> {
    /// Register handlers to run for events matching any of `patterns`.
    ///
    /// Nothing is validated here. A handler listed in several matching
    /// registrations runs once per registration.
    pub fn register<P, S, H>(mut self, patterns: P, handlers: H) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<Pattern>,
        H: IntoIterator<Item = HandlerRef>,
    {
        self.register_mut(patterns, handlers);
        self
    }

    /// Register handlers (mutable version).
    pub fn register_mut<P, S, H>(&mut self, patterns: P, handlers: H)
    where
        P: IntoIterator<Item = S>,
        S: Into<Pattern>,
        H: IntoIterator<Item = HandlerRef>,
    {
        self.registrations.push(Registration {
            patterns: patterns.into_iter().map(Into::into).collect(),
            handlers: handlers.into_iter().collect(),
        });
    }

    /// Replace the descriptor resolver.
    pub fn with_resolver<R2: HandlerResolver>(self, resolver: R2) -> RegistryBuilder<R2> {
        RegistryBuilder {
            registrations: self.registrations,
            resolver,
        }
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Registry<R> {
        Registry {
            registrations: self.registrations,
            resolver: self.resolver,
        }
    }

    /// Get the number of registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check if the builder has no registrations.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

// ============================================================================
// Registry - immutable, thread-safe registration storage
// ============================================================================

/// An immutable, thread-safe registry of pattern registrations.
///
/// Created by calling [`RegistryBuilder::build`]. Registrations are
/// evaluated in the order they were registered.
pub struct Registry<R = NoopResolver> {
    registrations: Vec<Registration>,
    resolver: R,
}

impl<R: HandlerResolver> Registry<R> {
    /// Iterate over the listeners for `event_type`, in order.
    ///
    /// Descriptors are resolved as the iterator reaches them.
    pub fn listeners<'a>(
        &'a self,
        event_type: &str,
    ) -> impl Iterator<Item = SharedListener> + use<'a, R> {
        let event_type = event_type.to_owned();
        self.registrations
            .iter()
            .filter(move |registration| registration.matches(&event_type))
            .flat_map(|registration| registration.handlers.iter())
            .flat_map(move |handler| self.expand(handler))
    }

    fn expand(&self, handler: &HandlerRef) -> Vec<SharedListener> {
        match handler {
            HandlerRef::Listener(listener) => vec![listener.clone()],
            HandlerRef::Descriptor(descriptor) => self.resolver.resolve(descriptor),
        }
    }
}

impl<R> Registry<R> {
    /// All registrations, in registration order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// The descriptor resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Get the number of registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<R: HandlerResolver> ListenerProvider for Registry<R> {
    fn listeners_for<'a>(
        &'a self,
        event: &WebhookEvent,
    ) -> Box<dyn Iterator<Item = SharedListener> + 'a> {
        Box::new(self.listeners(event.event_type()))
    }
}

impl<R> fmt::Debug for Registry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("registrations", &self.registrations)
            .finish_non_exhaustive()
    }
}
