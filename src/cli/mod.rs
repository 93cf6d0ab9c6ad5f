//! # CLI Module
//!
//! Command-line front end for checking a route manifest
//! (see [`crate::manifest`]) without an application around it.
//!
//! ## Commands
//!
//! ### `dispatch`
//!
//! Dispatch URLs against a manifest and print one JSON line per result:
//!
//! ```bash
//! navrouter dispatch --manifest routes.yaml /users/42 /admin/settings
//! ```
//!
//! Options:
//! - `--manifest <FILE>` - Route manifest (required)
//! - `--state <JSON>` - State object attached to every dispatch
//!
//! Without URL arguments, navigation events are read from stdin, one JSON
//! object per line: `{"url": "/users/42", "state": {"from": "link"}}`.
//! An event whose `url` is not a string is rejected.
//!
//! ### `routes`
//!
//! List every registered pattern with its compiled matcher, in precedence
//! order:
//!
//! ```bash
//! navrouter routes --manifest routes.yaml
//! ```
//!
//! ## Logging
//!
//! Router events go to stderr; set `NAVROUTER_LOG_LEVEL=debug` or `RUST_LOG`
//! to see registration and matching decisions.

mod commands;

pub use commands::{run_cli, Cli, Commands};
