//! Named-setting sources.
//!
//! Configs are resolved from anything implementing [`EnvSource`]: the
//! process environment, an in-memory map, a TOML file, or a layering of
//! these.

use std::collections::HashMap;

/// Read-only source of named settings.
///
/// Reading never mutates the source.
pub trait EnvSource {
    /// Returns the raw value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;

    /// Returns the trimmed value of `name`, treating empty values as unset.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Two sources where the first non-empty value wins.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use beatstore_clients::config::{EnvSource, Layered};
///
/// let upper = HashMap::from([("A".to_string(), String::new())]);
/// let lower = HashMap::from([("A".to_string(), "from-file".to_string())]);
///
/// assert_eq!(Layered::new(upper, lower).non_empty("A").as_deref(), Some("from-file"));
/// ```
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    upper: A,
    lower: B,
}

impl<A, B> Layered<A, B> {
    /// Layers `upper` over `lower`.
    #[must_use]
    pub const fn new(upper: A, lower: B) -> Self {
        Self { upper, lower }
    }
}

impl<A: EnvSource, B: EnvSource> EnvSource for Layered<A, B> {
    fn var(&self, name: &str) -> Option<String> {
        self.upper
            .non_empty(name)
            .or_else(|| self.lower.var(name))
    }
}
