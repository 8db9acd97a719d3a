//! # wicket-std
//!
//! Standard implementations for the Wicket webhook event router.
//!
//! This crate provides:
//! - **Authentication**: [`Authenticator`] with [`BasicAuth`] and [`CustomAuth`]
//! - **Registration**: [`RegistryBuilder`], [`Registry`], [`HandlerResolver`]
//! - **Dispatch**: [`Dispatcher`]
//! - **Selector routing**: [`EventRouter`], [`RouteTable`]
//! - **Configuration**: [`WebhookConfig`]
//! - **Standard listeners**: [`LoggingListener`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use wicket_core;

// Modules
pub mod auth;
pub mod config;
pub mod dispatcher;
pub mod listeners;
pub mod registry;
pub mod resolver;
pub mod router;
pub mod testing;

pub use auth::{Authenticator, BasicAuth, BoxAuthenticator, CustomAuth};
pub use config::{AuthConfig, ConfigError, ResultPolicy, WebhookConfig};
pub use dispatcher::Dispatcher;
pub use listeners::LoggingListener;
pub use registry::{HandlerRef, Registration, Registry, RegistryBuilder};
pub use resolver::{HandlerResolver, MapResolver, NoopResolver};
pub use router::{EventRouter, RouteTable};
