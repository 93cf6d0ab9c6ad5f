//! Error taxonomy for route registration and dispatch input.
//!
//! Registration errors are returned synchronously from `get`, `catch` and
//! `use_middleware` so a broken route table fails at startup. Dispatch itself
//! never fails: an unroutable URL is logged and ignored.

use thiserror::Error;

/// Errors raised while registering routes or handing a URL to the router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Two patterns in the same collection compiled to the same matcher
    ///
    /// `/users/:id` and `/users/:name` collide because identifiers do not
    /// take part in the compiled form.
    #[error("Route with same endpoint already exist. [{pattern}, /{existing}]({matcher})")]
    DuplicateRoute {
        /// Pattern being registered
        pattern: String,
        /// Route path of the route that already owns the matcher
        existing: String,
        /// The shared matcher source
        matcher: String,
    },

    /// A pattern declares the same `:identifier` more than once.
    #[error("Duplicated parameter. [{identifier}] in pattern '{pattern}'")]
    DuplicateParameter { pattern: String, identifier: String },

    /// A bound sub-pattern (`:name->regex`) or the assembled matcher failed to compile.
    #[error("Invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A registration was made without any pattern.
    #[error("Invalid registration: at least one pattern is required")]
    EmptyPatterns,

    /// Dispatch input was not a string.
    #[error("Invalid 'execute' argument. Expecting 'string', got {found}")]
    InvalidUrl { found: String },
}
