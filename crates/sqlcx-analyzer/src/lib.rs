#![forbid(unsafe_code)]
//! sqlcx-analyzer: EXPLAIN plan → per-step complexity → dominant class.
//!
//! Design:
//! - `ExplainProvider` is the only seam to a database. The analyzer calls it
//!   once per `subquery` step and recurses into the returned plan.
//! - `ComplexityAnalyzer` holds configuration only (the nesting bound), never
//!   per-call data, so one instance can serve concurrent callers.
//! - `AnalysisResult` keeps the structured estimate; its `Display` is the
//!   canonical text report.
//! - `fixture` reads plans plus canned subquery plans from YAML/JSON.

pub mod analyzer;
pub mod fixture;
#[cfg(feature = "tracing")]
pub mod metrics;
pub mod provider;
pub mod report;

pub use analyzer::{estimate_complexity, ComplexityAnalyzer};
pub use fixture::{parse_fixture, Fixture, FixtureConfig, ParsedFixture};
pub use provider::{ExplainProvider, FnProvider, InMemoryProvider};
pub use report::{AnalysisResult, StepDetail, StepEstimate};
