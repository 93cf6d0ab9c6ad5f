//! Request context built fresh for every dispatch.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

pub use crate::pattern::ParamVec;
use crate::pattern::CompiledPattern;

/// Caller-supplied navigation state, shallow-copied into each [`Request`].
pub type State = Map<String, Value>;

/// Snapshot of one dispatch: where it was routed and what was captured.
///
/// Stages only ever see `&Request`; it is not mutated after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Normalised base of the matched route (e.g. `/app`)
    pub base: String,
    /// Matched route path with a leading `/` (e.g. `/app/users/:id`)
    pub route: String,
    /// The URL exactly as it was dispatched
    pub path: String,
    /// Captured parameters in declaration order
    #[serde(serialize_with = "serialize_params")]
    pub params: ParamVec,
    pub state: State,
}

impl Request {
    pub(crate) fn new(
        pattern: &CompiledPattern,
        path: &str,
        params: ParamVec,
        state: Option<&State>,
    ) -> Self {
        Self {
            base: pattern.base().to_string(),
            route: format!("/{}", pattern.route_path()),
            path: path.to_string(),
            params,
            state: state.cloned().unwrap_or_default(),
        }
    }

    /// Get a path parameter by identifier.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters as an owned map. Allocates; prefer [`Request::param`].
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

fn serialize_params<S: serde::Serializer>(
    params: &ParamVec,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (k, v) in params {
        map.serialize_entry(k.as_ref(), v)?;
    }
    map.end()
}
