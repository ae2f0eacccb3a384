//! Convenient re-exports for downstream crates.

pub use crate::access::AccessMethod;
pub use crate::complexity::ComplexityClass;
pub use crate::config::AnalyzerConfig;
pub use crate::error::{Error, ProviderError, Result};
pub use crate::plan::{ExecutionPlan, PlanStep};
