//! Analyzer configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

/// Default bound on subquery nesting.
pub const DEFAULT_MAX_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum subquery nesting the analyzer will resolve. `0` forbids any
    /// provider call; exceeding the bound fails with `RecursionLimit`.
    pub max_depth: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SQLCX_MAX_DEPTH`: maximum subquery nesting depth
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("SQLCX_MAX_DEPTH") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_depth = v;
            }
        }

        cfg
    }
}
