//! # Pattern Module
//!
//! Compiles human-written route patterns into anchored, case-insensitive
//! regex matchers plus the parameter metadata needed to read captured values
//! back out of a match.
//!
//! ## Pattern syntax
//!
//! - Literal segments match verbatim (`/users/settings`).
//! - `:name` captures one path segment (`[^/]+`).
//! - `:name->regex` captures using the supplied sub-pattern (`/users/:id->\d+`).
//! - A trailing `*` makes the pattern a prefix match: no end anchor and no
//!   trailing-slash tolerance (`/admin/*`).
//!
//! ## Compilation
//!
//! `compile(base, pattern)` normalises the base to `/base`, joins it with the
//! pattern, collapses repeated slashes and strips the outer ones. What is left
//! is tokenised segment by segment:
//!
//! ```text
//! base "app", pattern "/users/:id->\d+/posts/:post"
//!   route path: app/users/:id->\d+/posts/:post
//!   matcher:    ^/app/users/(\d+)/posts/([^/]+)/?$
//!   params:     [id (index 0, group 1), post (index 1, group 2)]
//! ```
//!
//! The matcher source is the canonical identity of a route: two patterns that
//! compile to the same source are the same endpoint, whatever their parameters
//! are called.
//!
//! ## Example
//!
//! ```rust
//! use navrouter::pattern::{compile, TrailingMode};
//!
//! let compiled = compile("", "/users/:id").unwrap();
//! assert_eq!(compiled.matcher(), "^/users/([^/]+)/?$");
//! assert_eq!(compiled.trailing_mode(), TrailingMode::OptionalSlash);
//!
//! let params = compiled.captures("/users/42/").unwrap();
//! assert_eq!(params[0].1, "42");
//! ```

mod compile;

pub use compile::{
    compile, normalize_base, CompiledPattern, ParamDescriptor, ParamVec, TrailingMode,
    DEFAULT_PARAM_PATTERN, MAX_INLINE_PARAMS,
};
