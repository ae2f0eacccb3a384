//! YAML/JSON plan fixtures: a top-level plan plus canned subquery plans.
//!
//! Example:
//! ```yaml
//! config: { max_depth: 8 }
//! plan:
//!   - { type: ALL, table: users }
//!   - { type: subquery, query: "SELECT id FROM orders WHERE total > 10" }
//! subqueries:
//!   "SELECT id FROM orders WHERE total > 10":
//!     - { type: range, table: orders, key: idx_total }
//! ```
//! JSON documents parse too, since JSON is valid YAML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sqlcx_core::config::AnalyzerConfig;
use sqlcx_core::error::Result;
use sqlcx_core::plan::ExecutionPlan;

use crate::provider::InMemoryProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub config: Option<FixtureConfig>,
    pub plan: ExecutionPlan,
    #[serde(default)]
    pub subqueries: BTreeMap<String, ExecutionPlan>,
}

/// Per-document overrides; unset fields fall through to the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub max_depth: Option<usize>,
}

impl FixtureConfig {
    pub fn apply(&self, cfg: &mut AnalyzerConfig) {
        if let Some(depth) = self.max_depth {
            cfg.max_depth = depth;
        }
    }
}

#[derive(Debug)]
pub struct ParsedFixture {
    pub plan: ExecutionPlan,
    pub provider: InMemoryProvider,
    pub config: FixtureConfig,
}

impl ParsedFixture {
    /// Check every step of the top-level and canned plans for the fields the
    /// analyzer reads. Errors from canned plans name their query.
    pub fn validate(&self) -> Result<()> {
        self.plan.validate()?;
        for (query, plan) in self.provider.plans() {
            plan.validate().map_err(|e| e.in_subquery(query))?;
        }
        Ok(())
    }
}

pub fn parse_fixture(src: &str) -> std::result::Result<ParsedFixture, serde_yaml::Error> {
    let doc: Fixture = serde_yaml::from_str(src)?;
    Ok(ParsedFixture {
        plan: doc.plan,
        provider: InMemoryProvider::from(doc.subqueries),
        config: doc.config.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_with_subqueries_and_config() {
        let src = r#"
config:
  max_depth: 2
plan:
  - { type: ALL, table: users }
  - { type: subquery, query: "SELECT 1" }
subqueries:
  "SELECT 1":
    - { type: const }
"#;
        let parsed = parse_fixture(src).unwrap();
        assert_eq!(parsed.plan.len(), 2);
        assert_eq!(parsed.provider.len(), 1);
        assert_eq!(parsed.config.max_depth, Some(2));
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn config_section_overrides_only_set_fields() {
        let mut cfg = AnalyzerConfig::with_max_depth(9);
        FixtureConfig::default().apply(&mut cfg);
        assert_eq!(cfg.max_depth, 9);
        FixtureConfig { max_depth: Some(1) }.apply(&mut cfg);
        assert_eq!(cfg.max_depth, 1);
    }

    #[test]
    fn validate_names_the_broken_subquery() {
        let src = r#"
plan: [ { type: subquery, query: "Q" } ]
subqueries:
  Q: [ { table: t } ]
"#;
        let err = parse_fixture(src).unwrap().validate().unwrap_err();
        assert!(err.to_string().contains("in subquery `Q`"), "{err}");
    }

    #[test]
    fn missing_plan_is_a_parse_error() {
        assert!(parse_fixture("subqueries: {}").is_err());
        assert!(parse_fixture("plan: []\nextra: 1").is_err());
    }
}
