//! Router core: registration, dispatch and the subscription gate.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::group::RouteGroup;
use super::registration::{Patterns, RouteSpec};
use super::route::RouteTable;
use crate::error::RouterError;
use crate::middleware::{compose, CatchHandler, Middleware};
use crate::pattern::{compile, CompiledPattern};
use crate::request::{Request, State};
use crate::response::Response;
use crate::runtime_config::RouterConfig;

/// Receives every payload passed to [`Response::send`].
pub type Sink = Rc<dyn Fn(Value)>;

/// Middleware applied to every dispatch whose URL matches its pattern.
struct GlobalMiddleware {
    pattern: CompiledPattern,
    middleware: Middleware,
}

/// Client-side URL router.
///
/// Owns three collections, all scanned in registration order:
/// - normal routes (`get`), first match wins
/// - catch routes (`catch`), consulted when nothing matches or a stage calls
///   [`Response::error`]
/// - global middleware (`use_middleware`), every entry whose pattern matches runs
///
/// Dispatch is inactive until [`Router::subscribe`] is called.
pub struct Router {
    config: RouterConfig,
    routes: RouteTable<Middleware>,
    catch_routes: RouteTable<CatchHandler>,
    global: Vec<GlobalMiddleware>,
    active: Rc<Cell<bool>>,
    sink: RefCell<Option<Sink>>,
}

/// Returned by [`Router::subscribe`]; deactivates dispatch when consumed.
#[derive(Debug)]
pub struct Unsubscribe {
    active: Rc<Cell<bool>>,
}

impl Unsubscribe {
    /// Clear the router's active flag. Later `execute` calls are no-ops
    /// until the router is subscribed again.
    pub fn unsubscribe(self) {
        self.active.set(false);
        info!("Router unsubscribed");
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with an empty base and no initial URL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            routes: RouteTable::new("route"),
            catch_routes: RouteTable::new("catch"),
            global: Vec::new(),
            active: Rc::new(Cell::new(false)),
            sink: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register a normal route.
    ///
    /// The returned group registers nested routes under this one's patterns.
    ///
    /// # Errors
    ///
    /// Fails if a pattern does not compile or its matcher is already registered.
    pub fn get(
        &mut self,
        spec: RouteSpec<Middleware>,
    ) -> Result<RouteGroup<'_, Middleware>, RouterError> {
        let parents = self.routes.register(&self.config.base, spec)?;
        Ok(RouteGroup::new(&self.config.base, &mut self.routes, parents))
    }

    /// Register a catch route. Its middlewares are kept but only the handler runs.
    ///
    /// # Errors
    ///
    /// Same as [`Router::get`], checked against the catch collection only.
    pub fn catch(
        &mut self,
        spec: RouteSpec<CatchHandler>,
    ) -> Result<RouteGroup<'_, CatchHandler>, RouterError> {
        let parents = self.catch_routes.register(&self.config.base, spec)?;
        Ok(RouteGroup::new(&self.config.base, &mut self.catch_routes, parents))
    }

    /// Register global middleware for every pattern in `patterns`.
    ///
    /// Global middleware is not checked for duplicates.
    ///
    /// # Errors
    ///
    /// Fails on an empty pattern list or a pattern that does not compile.
    pub fn use_middleware(
        &mut self,
        patterns: impl Into<Patterns>,
        middleware: Middleware,
    ) -> Result<(), RouterError> {
        let patterns = patterns.into();
        if patterns.is_empty() {
            return Err(RouterError::EmptyPatterns);
        }
        for original in patterns.iter() {
            let pattern = compile(&self.config.base, original)?;
            debug!(
                kind = "use",
                pattern = %original,
                matcher = %pattern.matcher(),
                "Middleware registered"
            );
            self.global.push(GlobalMiddleware {
                pattern,
                middleware: Rc::clone(&middleware),
            });
        }
        Ok(())
    }

    /// Registered routes in precedence order.
    pub fn routes(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.routes.iter().map(|route| route.pattern())
    }

    /// Registered catch routes in precedence order.
    pub fn catch_routes(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.catch_routes.iter().map(|route| route.pattern())
    }

    /// Global middleware patterns in registration order.
    pub fn middleware_patterns(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.global.iter().map(|entry| &entry.pattern)
    }

    /// Activate dispatch and route every `send` to `sink`.
    ///
    /// If the config names an initial URL it is dispatched immediately.
    pub fn subscribe<F>(&self, sink: F) -> Unsubscribe
    where
        F: Fn(Value) + 'static,
    {
        self.active.set(true);
        *self.sink.borrow_mut() = Some(Rc::new(sink));
        info!(initial = ?self.config.initial, "Router subscribed");

        if let Some(initial) = &self.config.initial {
            self.execute(initial, None);
        }

        Unsubscribe {
            active: Rc::clone(&self.active),
        }
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.active.get()
    }

    /// Dispatch a navigation to `url`.
    ///
    /// 1. the first normal route matching `url` wins
    /// 2. a [`Request`] is built from its captures and a copy of `state`
    /// 3. matching global middleware, then route middleware, then the handler
    ///    run as one chain
    ///
    /// With no matching route the catch routes are tried without an error
    /// payload; if none matches either, the URL is logged and dropped.
    /// Does nothing while the router is not subscribed.
    pub fn execute(&self, url: &str, state: Option<&State>) {
        if !self.active.get() {
            debug!(url = %url, "Dispatch ignored, router not subscribed");
            return;
        }

        let response = Response::new(self, url, state);
        let Some((route, params)) = self.routes.find(url) else {
            debug!(url = %url, "No route matched, trying catch routes");
            self.resolve_catch(&response, None);
            return;
        };

        let request = Request::new(route.pattern(), url, params, state);
        let stages: Vec<Middleware> = self
            .global
            .iter()
            .filter(|entry| entry.pattern.is_match(url))
            .map(|entry| Rc::clone(&entry.middleware))
            .chain(route.middlewares().iter().map(Rc::clone))
            .chain(std::iter::once(Rc::clone(route.handler())))
            .collect();

        info!(
            url = %url,
            route = %request.route,
            path_params = ?request.params,
            stages = stages.len(),
            "Route matched"
        );

        compose(&stages, &request, &response).run();
    }

    /// Dispatch a URL received as JSON.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidUrl`] when `url` is not a JSON string; nothing is dispatched.
    pub fn execute_value(&self, url: &Value, state: Option<&State>) -> Result<(), RouterError> {
        let Value::String(url) = url else {
            return Err(RouterError::InvalidUrl {
                found: json_type_name(url).to_string(),
            });
        };
        self.execute(url, state);
        Ok(())
    }

    pub(crate) fn deliver(&self, payload: Value) {
        let sink = self.sink.borrow().as_ref().map(Rc::clone);
        match sink {
            Some(sink) => sink(payload),
            None => debug!("Result dropped, no sink subscribed"),
        }
    }

    pub(crate) fn resolve_catch(&self, response: &Response<'_>, payload: Option<&Value>) {
        let url = response.url();
        let Some((route, params)) = self.catch_routes.find(url) else {
            warn!(url = %url, "No route or catch fallbacks found");
            return;
        };

        let request = Request::new(route.pattern(), url, params, response.state());
        info!(
            url = %url,
            route = %request.route,
            has_error = payload.is_some(),
            "Catch route matched"
        );
        (route.handler())(&request, &response.for_catch(), payload);
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("catch_routes", &self.catch_routes)
            .field("global", &self.global.len())
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
