//! Handler descriptor resolution.
//!
//! A registration may name a handler instead of holding it, e.g. a key into
//! a service container. The registry asks its [`HandlerResolver`] to turn
//! such a descriptor into zero or more listeners when an event needs it.

use std::collections::HashMap;
use wicket_core::{Listener, SharedListener};

/// Turns a handler descriptor into listeners.
///
/// Returning an empty list skips the descriptor; it is not an error.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `HandlerResolver`",
    label = "missing `HandlerResolver` implementation",
    note = "Implement `resolve`, or pass a `Fn(&str) -> Vec<SharedListener>` closure."
)]
pub trait HandlerResolver: Send + Sync {
    /// Resolve `descriptor` into listeners, in invocation order.
    fn resolve(&self, descriptor: &str) -> Vec<SharedListener>;
}

impl<F> HandlerResolver for F
where
    F: Fn(&str) -> Vec<SharedListener> + Send + Sync,
{
    fn resolve(&self, descriptor: &str) -> Vec<SharedListener> {
        self(descriptor)
    }
}

/// The default resolver: resolves nothing, logging each skipped descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopResolver;

impl HandlerResolver for NoopResolver {
    fn resolve(&self, descriptor: &str) -> Vec<SharedListener> {
        tracing::warn!(descriptor, "skipping unresolvable handler descriptor");
        Vec::new()
    }
}

/// A resolver backed by a name → listeners map.
#[derive(Default, Clone)]
pub struct MapResolver {
    entries: HashMap<String, Vec<SharedListener>>,
}

impl MapResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `listener` under `name`. Repeated names accumulate in order.
    pub fn insert<L: Listener>(self, name: impl Into<String>, listener: L) -> Self {
        self.insert_shared(name, std::sync::Arc::new(listener))
    }

    /// Add an already shared listener under `name`.
    pub fn insert_shared(mut self, name: impl Into<String>, listener: SharedListener) -> Self {
        self.entries.entry(name.into()).or_default().push(listener);
        self
    }

    /// Whether anything is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl HandlerResolver for MapResolver {
    fn resolve(&self, descriptor: &str) -> Vec<SharedListener> {
        match self.entries.get(descriptor) {
            Some(listeners) => listeners.clone(),
            None => {
                tracing::warn!(descriptor, "no listener registered under descriptor");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for MapResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("MapResolver").field("names", &names).finish()
    }
}
