//! The request boundary.
//!
//! A [`Webhook`] takes one inbound request through the whole pipeline and
//! answers with an HTTP status:
//!
//! | step         | failure status |
//! |--------------|----------------|
//! | authenticate | 401            |
//! | parse        | 400            |
//! | dispatch     | 500            |
//!
//! On success the status is the event's best outcome (or worst, with
//! [`ResultPolicy::Worst`]), falling back to the not-found code when no
//! listener reported anything.

use http::{Request, StatusCode};
use wicket_core::{
    CredentialCheck, ListenerProvider, NOT_FOUND, WebhookError, WebhookEvent, WebhookRequest,
};
use wicket_std::{Authenticator, Dispatcher, ResultPolicy, WebhookConfig};

/// One webhook endpoint: an authenticator in front of a dispatcher.
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new()
///     .register(["Account/*"], [HandlerRef::listener(EventRouter::new(AccountHandlers))])
///     .build();
/// let webhook = Webhook::new(Authenticator::basic("user", "pass"), Dispatcher::new(registry));
///
/// let status = webhook.handle(&request);
/// ```
pub struct Webhook<C, P> {
    authenticator: Authenticator<C>,
    dispatcher: Dispatcher<P>,
    result: ResultPolicy,
    not_found_code: u16,
}

impl<C, P> Webhook<C, P>
where
    C: CredentialCheck,
    P: ListenerProvider,
{
    /// Create an endpoint answering with the best outcome, or 404.
    pub fn new(authenticator: Authenticator<C>, dispatcher: Dispatcher<P>) -> Self {
        Self {
            authenticator,
            dispatcher,
            result: ResultPolicy::Best,
            not_found_code: NOT_FOUND,
        }
    }

    /// Pick the status with `policy`.
    pub fn with_result_policy(mut self, policy: ResultPolicy) -> Self {
        self.result = policy;
        self
    }

    /// Answer with `code` when no listener reported an outcome.
    pub fn with_not_found_code(mut self, code: u16) -> Self {
        self.not_found_code = code;
        self
    }

    /// The authenticator.
    pub fn authenticator(&self) -> &Authenticator<C> {
        &self.authenticator
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher<P> {
        &self.dispatcher
    }

    /// Authenticate, parse and dispatch `request`.
    ///
    /// Returns the dispatched event so callers can inspect its outcomes.
    pub fn try_handle<R>(&self, request: &R) -> Result<WebhookEvent, WebhookError>
    where
        R: WebhookRequest + ?Sized,
    {
        let request = self.authenticator.authenticate(request)?;
        let event = WebhookEvent::from_request(request)?;
        Ok(self.dispatcher.dispatch(event)?)
    }

    /// The status to answer for a dispatched `event`.
    pub fn status_for(&self, event: &WebhookEvent) -> u16 {
        self.result.select(event, self.not_found_code)
    }

    /// Handle `request` and return the HTTP status to answer with.
    pub fn handle<R>(&self, request: &R) -> u16
    where
        R: WebhookRequest + ?Sized,
    {
        match self.try_handle(request) {
            Ok(event) => {
                let status = self.status_for(&event);
                tracing::debug!(
                    event_type = event.event_type(),
                    status,
                    "webhook handled"
                );
                status
            }
            Err(err @ WebhookError::Dispatch(_)) => {
                tracing::error!(error = %err, "webhook listener failed");
                err.status()
            }
            Err(err) => {
                tracing::warn!(error = %err, status = err.status(), "webhook rejected");
                err.status()
            }
        }
    }

    /// Handle an [`http::Request`].
    pub fn respond<B: AsRef<[u8]>>(&self, request: &Request<B>) -> StatusCode {
        let status = self.handle(request);
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<P: ListenerProvider> Webhook<Box<dyn CredentialCheck>, P> {
    /// Create an endpoint from configuration.
    pub fn from_config(config: &WebhookConfig, dispatcher: Dispatcher<P>) -> Self {
        Self::new(config.authenticator(), dispatcher)
            .with_result_policy(config.result)
            .with_not_found_code(config.not_found_code)
    }
}
