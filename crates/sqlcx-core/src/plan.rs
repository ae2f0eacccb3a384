//! EXPLAIN rows and ordered execution plans.
//!
//! `PlanStep` keeps the engine's column names (`type`, `query`) so rows can be
//! deserialized straight from an EXPLAIN result. Only the access-method tag and
//! the nested query are read; the remaining columns ride along for display.

use serde::{Deserialize, Serialize};

use crate::access::AccessMethod;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    #[serde(
        rename = "type",
        alias = "access_method",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_type: Option<String>,

    /// Embedded query text; present on `subquery` rows.
    #[serde(
        rename = "query",
        alias = "nested_query",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nested_query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
}

impl PlanStep {
    pub fn new(access_type: impl Into<String>) -> Self {
        Self {
            access_type: Some(access_type.into()),
            ..Default::default()
        }
    }

    pub fn subquery(query: impl Into<String>) -> Self {
        Self {
            access_type: Some("subquery".into()),
            nested_query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Parsed access method. `index` is the step's position, used only for
    /// error reporting. A missing tag is malformed; an unknown one is not.
    pub fn access_method(&self, index: usize) -> Result<AccessMethod> {
        self.access_type
            .as_deref()
            .map(AccessMethod::parse)
            .ok_or_else(|| Error::MalformedPlan {
                index,
                query: None,
                reason: "missing access method (`type`)".into(),
            })
    }

    /// Nested query text of a `subquery` step.
    pub fn subquery_text(&self, index: usize) -> Result<&str> {
        self.nested_query
            .as_deref()
            .ok_or_else(|| Error::MalformedPlan {
                index,
                query: None,
                reason: "subquery step without `query`".into(),
            })
    }

    /// Check the fields the analyzer will read, without classifying.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.access_method(index)?.is_subquery() {
            self.subquery_text(index)?;
        }
        Ok(())
    }
}

/// Ordered sequence of plan steps. Order only affects report layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionPlan {
    pub steps: Vec<PlanStep>,
}

impl ExecutionPlan {
    pub fn new(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanStep> {
        self.steps.iter()
    }

    pub fn validate(&self) -> Result<()> {
        self.steps
            .iter()
            .enumerate()
            .try_for_each(|(i, step)| step.validate(i))
    }
}

impl FromIterator<PlanStep> for ExecutionPlan {
    fn from_iter<T: IntoIterator<Item = PlanStep>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<PlanStep>> for ExecutionPlan {
    fn from(steps: Vec<PlanStep>) -> Self {
        Self::new(steps)
    }
}

impl<'a> IntoIterator for &'a ExecutionPlan {
    type Item = &'a PlanStep;
    type IntoIter = std::slice::Iter<'a, PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_explain_rows() {
        let json = r#"[
            {"type": "ALL", "table": "users", "rows": 1000},
            {"type": "subquery", "query": "SELECT 1"},
            {"access_method": "ref", "key": "PRIMARY"}
        ]"#;
        let plan: ExecutionPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.steps[0].access_type.as_deref(), Some("ALL"));
        assert_eq!(plan.steps[0].rows, Some(1000));
        assert_eq!(plan.steps[1].nested_query.as_deref(), Some("SELECT 1"));
        assert_eq!(plan.steps[2].access_type.as_deref(), Some("ref"));
    }

    #[test]
    fn missing_type_is_malformed() {
        let step: PlanStep = serde_json::from_str(r#"{"table": "t"}"#).unwrap();
        match step.access_method(4) {
            Err(Error::MalformedPlan { index, .. }) => assert_eq!(index, 4),
            other => panic!("expected MalformedPlan, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_not_malformed() {
        let step = PlanStep::new("weird_tag");
        assert_eq!(
            step.access_method(0).unwrap(),
            AccessMethod::Other("weird_tag".into())
        );
        assert!(step.validate(0).is_ok());
    }

    #[test]
    fn subquery_without_query_fails_validation() {
        let step = PlanStep::new("subquery");
        assert!(matches!(step.validate(1), Err(Error::MalformedPlan { index: 1, .. })));
        assert!(PlanStep::subquery("SELECT 1").validate(1).is_ok());
    }
}
