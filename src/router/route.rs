use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::registration::{Patterns, RouteSpec};
use crate::error::RouterError;
use crate::middleware::Middleware;
use crate::pattern::{compile, CompiledPattern, ParamVec};

/// A registered route: compiled pattern, handler and route middleware.
///
/// Immutable once registered.
pub struct Route<H> {
    pattern: CompiledPattern,
    handler: H,
    middlewares: Vec<Middleware>,
}

impl<H> Route<H> {
    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    #[must_use]
    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("route_path", &self.pattern.route_path())
            .field("matcher", &self.pattern.matcher())
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}

/// Routes of one collection in registration order, unique by matcher source.
///
/// Registration order is precedence order: lookups return the first route
/// whose matcher accepts the URL, never the most specific one.
pub struct RouteTable<H> {
    kind: &'static str,
    routes: Vec<Route<H>>,
}

impl<H> RouteTable<H> {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            routes: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    /// First route matching `url`, with its captured parameters.
    pub(crate) fn find(&self, url: &str) -> Option<(&Route<H>, ParamVec)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.captures(url).map(|params| (route, params)))
    }

    fn insert(&mut self, original: &str, route: Route<H>) -> Result<(), RouterError> {
        if let Some(existing) = self
            .routes
            .iter()
            .find(|r| r.pattern.matcher() == route.pattern.matcher())
        {
            return Err(RouterError::DuplicateRoute {
                pattern: original.to_string(),
                existing: existing.pattern.route_path().to_string(),
                matcher: route.pattern.matcher().to_string(),
            });
        }

        debug!(
            kind = self.kind,
            pattern = %original,
            matcher = %route.pattern.matcher(),
            params = route.pattern.parameters().len(),
            middlewares = route.middlewares.len(),
            "Route registered"
        );
        self.routes.push(route);
        Ok(())
    }
}

impl<H: Clone> RouteTable<H> {
    /// Register every pattern of `spec` under `base`, sharing handler and middleware.
    ///
    /// Patterns are registered one by one; on error, those before the failing
    /// one stay registered. Returns the patterns as written so a group can
    /// prefix nested registrations with them.
    pub(crate) fn register(
        &mut self,
        base: &str,
        spec: RouteSpec<H>,
    ) -> Result<Patterns, RouterError> {
        let RouteSpec {
            patterns,
            middlewares,
            handler,
        } = spec;
        if patterns.is_empty() {
            return Err(RouterError::EmptyPatterns);
        }

        for original in patterns.iter() {
            let route = Route {
                pattern: compile(base, original)?,
                handler: handler.clone(),
                middlewares: middlewares.iter().map(Rc::clone).collect(),
            };
            self.insert(original, route)?;
        }
        Ok(patterns)
    }
}

impl<H> fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("kind", &self.kind)
            .field("routes", &self.routes)
            .finish()
    }
}
