use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::request::Request;
use crate::response::Response;

/// A chain stage. Route handlers share this type; they are simply the last stage.
pub type Middleware = Rc<dyn Fn(&Request, &Response<'_>, Next<'_>)>;

/// Handler of a catch route, invoked with the error payload (if any).
pub type CatchHandler = Rc<dyn Fn(&Request, &Response<'_>, Option<&Value>)>;

/// Continuation handed to each stage.
///
/// Running it invokes the following stage; the continuation after the last
/// stage is a no-op.
pub struct Next<'a> {
    continuation: Box<dyn FnOnce() + 'a>,
}

impl<'a> Next<'a> {
    fn terminal() -> Self {
        Self {
            continuation: Box::new(|| {}),
        }
    }

    /// Continue with the next stage.
    pub fn run(self) {
        (self.continuation)();
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// Wrap a closure as a [`Middleware`].
pub fn middleware<F>(f: F) -> Middleware
where
    F: Fn(&Request, &Response<'_>, Next<'_>) + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as a route handler.
///
/// Same signature as [`middleware`]; handlers normally finish with
/// `res.send(..)` or `res.error(..)` and ignore `next`.
pub fn handler<F>(f: F) -> Middleware
where
    F: Fn(&Request, &Response<'_>, Next<'_>) + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as a [`CatchHandler`].
pub fn catch_handler<F>(f: F) -> CatchHandler
where
    F: Fn(&Request, &Response<'_>, Option<&Value>) + 'static,
{
    Rc::new(f)
}

/// Fold `stages` right-to-left into a single continuation.
///
/// Nothing runs until the returned [`Next`] is run. The engine never skips a
/// stage; only a stage that declines to run its `next` ends the chain early.
pub fn compose<'a>(
    stages: &[Middleware],
    request: &'a Request,
    response: &'a Response<'a>,
) -> Next<'a> {
    stages.iter().rev().fold(Next::terminal(), |next, stage| {
        let stage = Rc::clone(stage);
        Next {
            continuation: Box::new(move || stage(request, response, next)),
        }
    })
}
