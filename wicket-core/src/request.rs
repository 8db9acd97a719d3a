//! The inbound request boundary.
//!
//! Wicket does not own an HTTP stack. It only needs the raw body and a
//! header lookup, which is what [`WebhookRequest`] asks for.

/// An inbound webhook request.
pub trait WebhookRequest {
    /// The raw request body.
    fn body(&self) -> &[u8];

    /// All values sent for header `name`, compared case-insensitively.
    ///
    /// A header given twice yields two values; an absent header yields none.
    fn header_values(&self, name: &str) -> Vec<&str>;
}

impl<B: AsRef<[u8]>> WebhookRequest for http::Request<B> {
    fn body(&self) -> &[u8] {
        http::Request::body(self).as_ref()
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        // Values that are not visible ASCII still count towards the total.
        self.headers()
            .get_all(name)
            .iter()
            .map(|value| value.to_str().unwrap_or_default())
            .collect()
    }
}

impl<R: WebhookRequest + ?Sized> WebhookRequest for &R {
    fn body(&self) -> &[u8] {
        (**self).body()
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        (**self).header_values(name)
    }
}
