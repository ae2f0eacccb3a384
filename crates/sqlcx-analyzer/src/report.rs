//! Structured estimate and its canonical text rendering.
//!
//! Text layout (every line newline-terminated):
//! ```text
//! Estimated Complexity. 
//! Description:\t<desc> + <desc>.
//! Complexity:\t<tok> + <tok>
//! Dominant Complexity: <class>
//! ```
//! A subquery's token is its whole nested report, embedded verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlcx_core::access::AccessMethod;
use sqlcx_core::complexity::ComplexityClass;

/// How a step was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDetail {
    /// A tag from the classification table.
    Access { method: AccessMethod },
    /// Resolved through the provider; carries the nested estimate.
    Subquery {
        query: String,
        report: Box<AnalysisResult>,
    },
    /// Tag outside the table. Classified `Unknown`, no description.
    Unrecognized { tag: String },
}

/// One classified step. Its class always follows from `detail`; documents
/// are re-derived on deserialization rather than trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StepDoc")]
pub struct StepEstimate {
    class: ComplexityClass,
    detail: StepDetail,
}

#[derive(Deserialize)]
struct StepDoc {
    detail: StepDetail,
}

impl From<StepDoc> for StepEstimate {
    fn from(doc: StepDoc) -> Self {
        match doc.detail {
            StepDetail::Access { method } => Self::from_access(method),
            StepDetail::Unrecognized { tag } => Self::from_access(AccessMethod::parse(&tag)),
            StepDetail::Subquery { query, report } => Self::from_subquery(query, *report),
        }
    }
}

impl StepEstimate {
    pub fn from_access(method: AccessMethod) -> Self {
        let class = method.class();
        let detail = match method {
            AccessMethod::Other(tag) => StepDetail::Unrecognized { tag },
            method => StepDetail::Access { method },
        };
        Self { class, detail }
    }

    /// The step contributes the nested plan's dominant class.
    pub fn from_subquery(query: impl Into<String>, report: AnalysisResult) -> Self {
        Self {
            class: report.dominant,
            detail: StepDetail::Subquery {
                query: query.into(),
                report: Box::new(report),
            },
        }
    }

    pub fn class(&self) -> ComplexityClass {
        self.class
    }

    pub fn detail(&self) -> &StepDetail {
        &self.detail
    }

    pub fn description(&self) -> Option<String> {
        match &self.detail {
            StepDetail::Access { method } => method
                .label()
                .map(|label| format!("{} {}", self.class, label)),
            StepDetail::Subquery { report, .. } => Some(format!("Subquery: ({report})")),
            StepDetail::Unrecognized { .. } => None,
        }
    }

    pub fn token(&self) -> String {
        match &self.detail {
            StepDetail::Subquery { report, .. } => report.to_string(),
            _ => self.class.label().to_string(),
        }
    }
}

/// Result of one analyzer call. Built once, never mutated afterwards.
/// `dominant` is always the most severe step class; a serialized `dominant`
/// is ignored and recomputed on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReportDoc")]
pub struct AnalysisResult {
    steps: Vec<StepEstimate>,
    dominant: ComplexityClass,
}

#[derive(Deserialize)]
struct ReportDoc {
    #[serde(default)]
    steps: Vec<StepEstimate>,
}

impl From<ReportDoc> for AnalysisResult {
    fn from(doc: ReportDoc) -> Self {
        Self::new(doc.steps)
    }
}

impl AnalysisResult {
    pub fn new(steps: Vec<StepEstimate>) -> Self {
        let dominant = ComplexityClass::dominant(steps.iter().map(|s| s.class));
        Self { steps, dominant }
    }

    pub fn steps(&self) -> &[StepEstimate] {
        &self.steps
    }

    pub fn dominant(&self) -> ComplexityClass {
        self.dominant
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.steps.iter().filter_map(StepEstimate::description).collect()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.steps.iter().map(StepEstimate::token).collect()
    }

    /// Deepest subquery nesting inside this report (0 when flat).
    pub fn nesting_depth(&self) -> usize {
        self.steps
            .iter()
            .filter_map(|s| match &s.detail {
                StepDetail::Subquery { report, .. } => Some(1 + report.nesting_depth()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn exceeds(&self, threshold: ComplexityClass) -> bool {
        self.dominant > threshold
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Estimated Complexity. \nDescription:\t{}.\nComplexity:\t{}\nDominant Complexity: {}\n",
            self.descriptions().join(" + "),
            self.tokens().join(" + "),
            self.dominant
        )
    }
}
