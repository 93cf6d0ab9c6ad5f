//! # Route Manifest
//!
//! Declarative route tables in YAML, used by the `navrouter` binary to check
//! how URLs dispatch without writing any handler code.
//!
//! ```yaml
//! base: /app
//! initial: /
//! routes:
//!   - name: home
//!     patterns: ["/"]
//!   - name: user
//!     patterns: ["/users/:id->\\d+"]
//! catch:
//!   - name: not_found
//!     patterns: ["*"]
//! use:
//!   - name: admin_audit
//!     patterns: ["/admin/*"]
//! ```
//!
//! Each route handler sends `{"route", "path", "params", "state"}`, each catch
//! handler sends `{"catch", "path", "params", "error"}`. `use` entries become
//! pass-through middleware that record the entry name in a debug event.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::middleware::{catch_handler, handler, middleware};
use crate::router::{RouteSpec, Router};
use crate::runtime_config::RouterConfig;

/// A named group of patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub patterns: Vec<String>,
}

/// Route table as loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteManifest {
    #[serde(flatten)]
    pub config: RouterConfig,
    pub routes: Vec<ManifestEntry>,
    pub catch: Vec<ManifestEntry>,
    #[serde(rename = "use")]
    pub middleware: Vec<ManifestEntry>,
}

impl RouteManifest {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse route manifest")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route manifest {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Build a router whose handlers report which entry matched.
    ///
    /// Entries are registered in file order, `use` entries first.
    pub fn build_router(&self) -> Result<Router> {
        let mut router = Router::with_config(self.config.clone());

        for entry in &self.middleware {
            let name = entry.name.clone();
            let stage = middleware(move |req, _res, next| {
                debug!(middleware = %name, path = %req.path, "Manifest middleware");
                next.run();
            });
            router
                .use_middleware(entry.patterns.clone(), stage)
                .with_context(|| format!("Failed to register middleware '{}'", entry.name))?;
        }

        for entry in &self.routes {
            let name = entry.name.clone();
            let route = handler(move |req, res, _next| {
                res.send(json!({
                    "route": name,
                    "path": req.path,
                    "params": req.params_map(),
                    "state": req.state,
                }));
            });
            router
                .get(RouteSpec::new(entry.patterns.clone(), route))
                .with_context(|| format!("Failed to register route '{}'", entry.name))?;
        }

        for entry in &self.catch {
            let name = entry.name.clone();
            let fallback = catch_handler(move |req, res, error| {
                res.send(json!({
                    "catch": name,
                    "path": req.path,
                    "params": req.params_map(),
                    "error": error.cloned().unwrap_or(Value::Null),
                }));
            });
            router
                .catch(RouteSpec::new(entry.patterns.clone(), fallback))
                .with_context(|| format!("Failed to register catch route '{}'", entry.name))?;
        }

        Ok(router)
    }
}
