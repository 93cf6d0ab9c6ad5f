//! Response handle passed to every stage of a dispatch.

use serde_json::Value;
use tracing::warn;

use crate::request::State;
use crate::router::Router;

/// Ends a dispatch, either by delivering a result or by signalling an error.
///
/// `send` forwards to the sink registered with [`Router::subscribe`].
/// `error` re-resolves the dispatched URL against the catch routes, except
/// from inside a catch handler, where it is logged and dropped.
#[derive(Debug, Clone, Copy)]
pub struct Response<'r> {
    router: &'r Router,
    url: &'r str,
    state: Option<&'r State>,
    in_catch: bool,
}

impl<'r> Response<'r> {
    pub(crate) fn new(router: &'r Router, url: &'r str, state: Option<&'r State>) -> Self {
        Self {
            router,
            url,
            state,
            in_catch: false,
        }
    }

    /// Copy handed to a catch handler; its `error` does not resolve again.
    pub(crate) fn for_catch(&self) -> Self {
        Self {
            in_catch: true,
            ..*self
        }
    }

    /// Deliver `payload` to the subscribed result sink.
    pub fn send(&self, payload: Value) {
        self.router.deliver(payload);
    }

    /// Hand the current URL to the catch routes with `payload` as the error.
    pub fn error(&self, payload: Value) {
        if self.in_catch {
            warn!(url = %self.url, error = %payload, "Error raised inside catch route, dropped");
            return;
        }
        self.router.resolve_catch(self, Some(&payload));
    }

    /// The URL being dispatched.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url
    }

    pub(crate) fn state(&self) -> Option<&'r State> {
        self.state
    }
}
