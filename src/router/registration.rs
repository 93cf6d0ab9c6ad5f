use std::fmt;

use crate::middleware::Middleware;

/// Pattern used when a registration names no route: matches every URL.
pub const MATCH_ALL: &str = "*";

/// One or more route patterns registered under the same handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patterns(Vec<String>);

impl Patterns {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for Patterns {
    fn from(pattern: &str) -> Self {
        Self(vec![pattern.to_string()])
    }
}

impl From<String> for Patterns {
    fn from(pattern: String) -> Self {
        Self(vec![pattern])
    }
}

impl From<&String> for Patterns {
    fn from(pattern: &String) -> Self {
        Self(vec![pattern.clone()])
    }
}

impl From<Vec<String>> for Patterns {
    fn from(patterns: Vec<String>) -> Self {
        Self(patterns)
    }
}

impl From<Vec<&str>> for Patterns {
    fn from(patterns: Vec<&str>) -> Self {
        Self(patterns.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Patterns {
    fn from(patterns: &[&str]) -> Self {
        Self(patterns.iter().map(|p| (*p).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Patterns {
    fn from(patterns: [&str; N]) -> Self {
        Self(patterns.iter().map(|p| (*p).to_string()).collect())
    }
}

/// A registration request: patterns, route middleware and the handler.
///
/// `H` is [`Middleware`] for normal routes and
/// [`CatchHandler`](crate::middleware::CatchHandler) for catch routes.
pub struct RouteSpec<H> {
    pub(crate) patterns: Patterns,
    pub(crate) middlewares: Vec<Middleware>,
    pub(crate) handler: H,
}

impl<H> RouteSpec<H> {
    pub fn new(patterns: impl Into<Patterns>, handler: H) -> Self {
        Self {
            patterns: patterns.into(),
            middlewares: Vec::new(),
            handler,
        }
    }

    /// Register `handler` for every URL (`*`).
    pub fn any(handler: H) -> Self {
        Self::new(MATCH_ALL, handler)
    }

    /// Append a route-specific middleware; runs after global middleware.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Middleware) -> Self {
        self.middlewares.push(middleware);
        self
    }

    #[must_use]
    pub fn with_middlewares(mut self, middlewares: impl IntoIterator<Item = Middleware>) -> Self {
        self.middlewares.extend(middlewares);
        self
    }

    #[must_use]
    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }
}

impl<H> fmt::Debug for RouteSpec<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSpec")
            .field("patterns", &self.patterns)
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}
