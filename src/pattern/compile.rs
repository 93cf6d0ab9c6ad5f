use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;

use crate::error::RouterError;

/// Sub-pattern used for a parameter without an explicit `->` bound.
pub const DEFAULT_PARAM_PATTERN: &str = "[^/]+";

/// Maximum number of path parameters stored inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted path parameters in declaration order.
///
/// Identifiers are shared with the compiled route, so cloning a name is a
/// refcount bump; values are owned per dispatch.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

const BOUND_SEPARATOR: &str = "->";

/// How the end of a compiled matcher is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingMode {
    /// Pattern ended with `*`: prefix match, longer paths are accepted.
    Strict,
    /// End-anchored with one optional trailing `/`.
    OptionalSlash,
}

/// A single `:identifier` placeholder of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Zero-based position among the pattern's parameters.
    pub index: usize,
    /// Capture group holding this parameter's value.
    ///
    /// Equals `index + 1` unless an earlier bound sub-pattern has groups of its own.
    pub group: usize,
    /// The segment as written, e.g. `:id->\d+`.
    pub raw_token: String,
    pub identifier: Arc<str>,
}

/// The matchable form of a `(base, pattern)` pair.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    base: String,
    route_path: String,
    matcher: String,
    regex: Regex,
    parameters: Vec<ParamDescriptor>,
    trailing: TrailingMode,
}

impl CompiledPattern {
    /// Normalised base (`/` followed by the base without outer slashes).
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Joined pattern without outer slashes or the `*` marker.
    #[must_use]
    pub fn route_path(&self) -> &str {
        &self.route_path
    }

    /// Canonical matcher source, used as the route's identity.
    #[must_use]
    pub fn matcher(&self) -> &str {
        &self.matcher
    }

    #[must_use]
    pub fn parameters(&self) -> &[ParamDescriptor] {
        &self.parameters
    }

    #[must_use]
    pub fn trailing_mode(&self) -> TrailingMode {
        self.trailing
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and collect parameter values by their capture group.
    ///
    /// Returns `None` when the path does not match. Parameters whose group did
    /// not participate in the match are left out.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<ParamVec> {
        let captures = self.regex.captures(path)?;
        let mut params = ParamVec::new();
        for param in &self.parameters {
            if let Some(value) = captures.get(param.group) {
                params.push((Arc::clone(&param.identifier), value.as_str().to_string()));
            }
        }
        Some(params)
    }
}

/// Normalise a base path to one leading `/` and no trailing `/`.
///
/// An empty base becomes `/`.
#[must_use]
pub fn normalize_base(base: &str) -> String {
    format!("/{}", base.trim_matches('/'))
}

/// Compile `pattern` under `base` into a [`CompiledPattern`].
///
/// # Errors
///
/// - [`RouterError::DuplicateParameter`] when an identifier appears twice
/// - [`RouterError::InvalidPattern`] when a bound sub-pattern is not a valid regex
pub fn compile(base: &str, pattern: &str) -> Result<CompiledPattern, RouterError> {
    let base = normalize_base(base);
    let joined = collapse_slashes(&format!("{base}/{pattern}"));
    let mut route_path = joined.trim_matches('/');

    let trailing = if route_path.ends_with('*') {
        route_path = route_path.trim_end_matches('*');
        TrailingMode::Strict
    } else {
        TrailingMode::OptionalSlash
    };

    let mut matcher = String::with_capacity(route_path.len() + 8);
    matcher.push_str("^/");
    let mut parameters: Vec<ParamDescriptor> = Vec::new();
    // group 0 is the whole match
    let mut group = 1;

    for (position, segment) in route_path.split('/').enumerate() {
        if position > 0 {
            matcher.push('/');
        }
        let Some((identifier, bound)) = parse_parameter(segment) else {
            matcher.push_str(&regex::escape(segment));
            continue;
        };

        if parameters.iter().any(|p| p.identifier.as_ref() == identifier) {
            return Err(RouterError::DuplicateParameter {
                pattern: pattern.to_string(),
                identifier: identifier.to_string(),
            });
        }

        let (sub_pattern, inner_groups) = match bound {
            Some(bound) => {
                let inner = Regex::new(bound).map_err(|source| RouterError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
                (bound, inner.captures_len() - 1)
            }
            None => (DEFAULT_PARAM_PATTERN, 0),
        };

        matcher.push('(');
        matcher.push_str(sub_pattern);
        matcher.push(')');

        parameters.push(ParamDescriptor {
            index: parameters.len(),
            group,
            raw_token: segment.to_string(),
            identifier: Arc::from(identifier),
        });
        group += 1 + inner_groups;
    }

    if trailing == TrailingMode::OptionalSlash {
        matcher.push_str("/?$");
    }

    let regex = RegexBuilder::new(&matcher)
        .case_insensitive(true)
        .build()
        .map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

    Ok(CompiledPattern {
        base,
        route_path: route_path.to_string(),
        matcher,
        regex,
        parameters,
        trailing,
    })
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(ch);
    }
    out
}

/// Split `:identifier->bound` into its parts; `None` for literal segments.
///
/// A lone `:` has no identifier and stays literal. An empty bound falls back
/// to the default sub-pattern.
fn parse_parameter(segment: &str) -> Option<(&str, Option<&str>)> {
    let body = segment.strip_prefix(':').filter(|body| !body.is_empty())?;
    match body.split_once(BOUND_SEPARATOR) {
        Some((identifier, bound)) => Some((identifier, Some(bound).filter(|b| !b.is_empty()))),
        None => Some((body, None)),
    }
}
