//! # navrouter
//!
//! **navrouter** is a small client-side URL router: it maps a navigation URL to
//! a registered handler, extracts named path parameters and runs a chain of
//! middleware before the handler, all synchronously and without a network
//! round-trip.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - Compiles `/users/:id->\d+` style patterns into anchored matchers
//! - **[`router`]** - Registration (`get`, `catch`, `use_middleware`), dispatch and subscription
//! - **[`middleware`]** - Continuation-style middleware chain
//! - **[`request`]** / **[`response`]** - What every chain stage receives
//! - **[`runtime_config`]** - `base` and `initial` settings
//! - **[`manifest`]** - YAML route tables for the `navrouter` binary
//! - **[`logging`]** - `tracing-subscriber` setup
//!
//! ### Dispatch Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Router
//!     participant Chain as Middleware Chain
//!     participant Handler
//!     participant Catch as Catch Route
//!
//!     App->>Router: execute("/users/42", state)
//!     Router->>Router: first route whose matcher accepts the URL
//!     alt route matched
//!         Router->>Chain: global middleware ++ route middleware ++ handler
//!         Chain->>Handler: next() ... next()
//!         Handler->>App: res.send(payload) via subscribed sink
//!         opt handler signals an error
//!             Handler->>Catch: res.error(payload)
//!         end
//!     else no route
//!         Router->>Catch: first catch route matching the URL
//!         Catch->>App: res.send(...)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use navrouter::middleware::{handler, middleware};
//! use navrouter::router::{RouteSpec, Router};
//! use navrouter::runtime_config::RouterConfig;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), navrouter::RouterError> {
//! let mut router = Router::with_config(RouterConfig::default().with_base("/app"));
//!
//! router.use_middleware("/admin/*", middleware(|_req, _res, _next| {
//!     // not logged in: never call next, the admin handler does not run
//! }))?;
//! router.get(RouteSpec::new("/admin/settings", handler(|_req, res, _next| {
//!     res.send(json!("settings"));
//! })))?;
//! router.get(RouteSpec::new("/users/:id->\\d+", handler(|req, res, _next| {
//!     res.send(json!({ "id": req.param("id") }));
//! })))?;
//!
//! let _subscription = router.subscribe(|value| println!("{value}"));
//! router.execute("/app/users/42", None);
//! router.execute("/app/admin/settings", None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution Model
//!
//! Single-threaded and synchronous: `execute` runs the whole chain on the
//! caller's stack. A stage may call `execute` again through a shared handle;
//! the nested dispatch completes before the outer chain resumes.

pub mod cli;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod middleware;
pub mod pattern;
pub mod request;
pub mod response;
pub mod router;
pub mod runtime_config;

pub use error::RouterError;
pub use request::{Request, State};
pub use response::Response;
pub use router::{RouteSpec, Router};
pub use runtime_config::RouterConfig;
