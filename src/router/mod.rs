//! # Router Module
//!
//! Maps navigation URLs to registered handlers without a network round-trip.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route patterns (see [`crate::pattern`]) at registration time
//! - Rejecting duplicate endpoints within a collection
//! - Matching a dispatched URL against routes in registration order
//! - Building the [`Request`](crate::request::Request) and running the
//!   middleware chain that ends in the route handler
//! - Falling back to catch routes when nothing matches
//!
//! ## Architecture
//!
//! 1. **Registration**: `get`, `catch` and `use_middleware` compile each pattern
//!    under the router's base and append it to its collection. `get` and
//!    `catch` return a [`RouteGroup`] for declaring sub-routes.
//!
//! 2. **Dispatch**: [`Router::execute`] scans the routes linearly. The first
//!    matching route wins even when a later one is more specific; register
//!    specific routes first.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use navrouter::middleware::{catch_handler, handler};
//! use navrouter::router::{RouteSpec, Router};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), navrouter::RouterError> {
//! let mut router = Router::new();
//! router.get(RouteSpec::new("/users/:id", handler(|req, res, _next| {
//!     res.send(json!({ "user": req.param("id") }));
//! })))?;
//! router.catch(RouteSpec::any(catch_handler(|req, res, _err| {
//!     res.send(json!({ "missing": req.path }));
//! })))?;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let subscription = router.subscribe(move |value| sink.borrow_mut().push(value));
//!
//! router.execute("/users/42", None);
//! router.execute("/nowhere", None);
//! subscription.unsubscribe();
//!
//! assert_eq!(
//!     *seen.borrow(),
//!     vec![json!({ "user": "42" }), json!({ "missing": "/nowhere" })]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Performance
//!
//! Lookup is O(n) in the number of routes. Route tables for navigation are
//! small, and registration order has to be observable anyway.

mod core;
mod group;
mod registration;
mod route;

pub use core::{Router, Sink, Unsubscribe};
pub use group::RouteGroup;
pub use registration::{Patterns, RouteSpec, MATCH_ALL};
pub use route::{Route, RouteTable};
