//! # Runtime Configuration Module
//!
//! Per-router settings, fixed when the router is constructed.
//!
//! ## Fields
//!
//! - `base`: URL prefix applied to every pattern registered on the router
//!   (`"app"` turns `/users` into `/app/users`). Default: empty.
//! - `initial`: URL dispatched once as soon as the router is subscribed.
//!   Default: none.
//!
//! ## Environment Variables
//!
//! ### `NAVROUTER_BASE`
//!
//! Sets `base`.
//!
//! ### `NAVROUTER_INITIAL`
//!
//! Sets `initial`. An empty value is treated as unset.
//!
//! ## YAML
//!
//! ```yaml
//! base: /app
//! initial: /home
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use navrouter::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::default().with_base("/app").with_initial("/home");
//! assert_eq!(config.base, "/app");
//! assert_eq!(config.initial.as_deref(), Some("/home"));
//! ```

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Router settings loaded from code, environment variables or YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Prefix for every registered pattern
    pub base: String,
    /// URL dispatched on subscribe
    pub initial: Option<String>,
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base: env::var("NAVROUTER_BASE").unwrap_or_default(),
            initial: env::var("NAVROUTER_INITIAL").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse router config")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read router config {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    #[must_use]
    pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = Some(initial.into());
        self
    }
}
