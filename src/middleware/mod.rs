//! # Middleware Module
//!
//! Continuation-style middleware. Every stage of a dispatch (global
//! middleware, route middleware and finally the route handler) has the same
//! shape:
//!
//! ```text
//! Fn(&Request, &Response<'_>, Next<'_>)
//! ```
//!
//! A stage continues the chain by calling [`Next::run`]. Dropping `next`
//! without running it short-circuits everything downstream, which is how a
//! guard ends a navigation before the handler runs.
//!
//! ## Ordering
//!
//! For a matched route the router composes
//!
//! 1. global middleware whose pattern matches the URL, in registration order
//! 2. the route's own middleware, in registration order
//! 3. the route handler
//!
//! into one continuation with [`compose`]. The handler receives the terminal
//! `Next`, which does nothing.
//!
//! ## Example
//!
//! ```rust
//! use navrouter::middleware::{handler, middleware};
//! use navrouter::router::{RouteSpec, Router};
//! use serde_json::json;
//!
//! let mut router = Router::new();
//! let guard = middleware(|req, _res, next| {
//!     if req.param("id") != Some("0") {
//!         next.run();
//!     }
//! });
//! router
//!     .get(
//!         RouteSpec::new("/users/:id", handler(|req, res, _next| {
//!             res.send(json!({ "user": req.param("id") }));
//!         }))
//!         .with_middleware(guard),
//!     )
//!     .unwrap();
//! ```

mod core;

pub use core::{catch_handler, compose, handler, middleware, CatchHandler, Middleware, Next};
