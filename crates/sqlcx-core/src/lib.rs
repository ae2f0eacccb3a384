#![forbid(unsafe_code)]
//! sqlcx-core: shared vocabulary for plan complexity estimation.
//!
//! - `complexity`: the ordered set of asymptotic classes.
//! - `access`: access-method tags and the fixed classification table.
//! - `plan`: EXPLAIN rows (`PlanStep`) and ordered plans (`ExecutionPlan`).
//! - `config` / `error`: analyzer knobs and the canonical error enum.
//!
//! No providers, no I/O here. The analyzer crate drives these types.

pub mod access;
pub mod complexity;
pub mod config;
pub mod error;
pub mod plan;
pub mod prelude;

pub use access::AccessMethod;
pub use complexity::ComplexityClass;
pub use config::AnalyzerConfig;
pub use error::{Error, ProviderError, Result};
pub use plan::{ExecutionPlan, PlanStep};
