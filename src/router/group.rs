use std::fmt;

use super::registration::{Patterns, RouteSpec, MATCH_ALL};
use super::route::RouteTable;
use crate::error::RouterError;

/// Builder returned by [`Router::get`](super::Router::get) and
/// [`Router::catch`](super::Router::catch) for declaring sub-routes.
///
/// Every nested pattern is appended to every parent pattern and registered in
/// the parent's collection. A parent's trailing `*` is dropped first, so
/// `/users/*` + `/:id` registers `/users/:id`. Concatenation is plain string
/// appending: children should start with `/`.
///
/// ```rust
/// use navrouter::middleware::handler;
/// use navrouter::router::{RouteSpec, Router};
///
/// let noop = handler(|_req, _res, _next| {});
/// let mut router = Router::new();
/// router
///     .get(RouteSpec::new(["/users/*", "/members/*"], noop.clone()))
///     .unwrap()
///     .get(RouteSpec::new("/:id", noop.clone()))
///     .unwrap()
///     .get(RouteSpec::new("/:id/posts", noop))
///     .unwrap();
/// assert_eq!(router.routes().count(), 6);
/// ```
pub struct RouteGroup<'r, H> {
    base: &'r str,
    table: &'r mut RouteTable<H>,
    parents: Patterns,
}

impl<'r, H: Clone> RouteGroup<'r, H> {
    pub(crate) fn new(base: &'r str, table: &'r mut RouteTable<H>, parents: Patterns) -> Self {
        Self {
            base,
            table,
            parents,
        }
    }

    /// Register `spec` under each parent pattern.
    pub fn get(&mut self, spec: RouteSpec<H>) -> Result<&mut Self, RouterError> {
        let RouteSpec {
            patterns,
            middlewares,
            handler,
        } = spec;
        if patterns.is_empty() {
            return Err(RouterError::EmptyPatterns);
        }

        let mut joined = Vec::with_capacity(self.parents.len() * patterns.len());
        for parent in self.parents.iter() {
            let prefix = parent.strip_suffix(MATCH_ALL).unwrap_or(parent);
            for child in patterns.iter() {
                joined.push(format!("{prefix}{child}"));
            }
        }

        self.table.register(
            self.base,
            RouteSpec {
                patterns: joined.into(),
                middlewares,
                handler,
            },
        )?;
        Ok(self)
    }

    /// Patterns this group prefixes nested registrations with.
    #[must_use]
    pub fn parents(&self) -> &Patterns {
        &self.parents
    }
}

impl<H> fmt::Debug for RouteGroup<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGroup")
            .field("base", &self.base)
            .field("parents", &self.parents)
            .field("routes", &self.table.len())
            .finish()
    }
}
