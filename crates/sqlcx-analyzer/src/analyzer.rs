//! Recursive plan classification.
//!
//! Each step is classified from its access-method tag. A `subquery` step asks
//! the provider for the nested plan, analyzes it with the same provider, and
//! contributes the nested dominant class. Provider failures propagate as-is;
//! nothing is retried or defaulted.

use sqlcx_core::config::AnalyzerConfig;
use sqlcx_core::error::{Error, Result};
use sqlcx_core::plan::ExecutionPlan;

#[cfg(feature = "tracing")]
use crate::metrics::emit_span;
use crate::provider::ExplainProvider;
use crate::report::{AnalysisResult, StepEstimate};

/// Stateless apart from its config; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ComplexityAnalyzer {
    config: AnalyzerConfig,
}

impl ComplexityAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn estimate_complexity<P>(
        &self,
        plan: &ExecutionPlan,
        provider: &P,
    ) -> Result<AnalysisResult>
    where
        P: ExplainProvider + ?Sized,
    {
        let result = self.estimate_at_depth(plan, provider, 0)?;
        #[cfg(feature = "tracing")]
        emit_span(
            "analysis_finished",
            &[
                ("steps", result.steps().len().to_string()),
                ("dominant", result.dominant().to_string()),
                ("nesting", result.nesting_depth().to_string()),
            ],
        );
        Ok(result)
    }

    fn estimate_at_depth<P>(
        &self,
        plan: &ExecutionPlan,
        provider: &P,
        depth: usize,
    ) -> Result<AnalysisResult>
    where
        P: ExplainProvider + ?Sized,
    {
        let mut steps = Vec::with_capacity(plan.len());

        for (index, step) in plan.iter().enumerate() {
            let method = step.access_method(index)?;

            let estimate = if method.is_subquery() {
                let query = step.subquery_text(index)?;
                if depth >= self.config.max_depth {
                    return Err(Error::RecursionLimit {
                        limit: self.config.max_depth,
                        query: query.to_string(),
                    });
                }

                #[cfg(feature = "tracing")]
                tracing::debug!(depth, query, "resolving subquery plan");

                let nested_plan = provider.get_plan(query)?;
                let nested = self
                    .estimate_at_depth(&nested_plan, provider, depth + 1)
                    .map_err(|e| e.in_subquery(query))?;
                StepEstimate::from_subquery(query, nested)
            } else {
                StepEstimate::from_access(method)
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(depth, index, class = %estimate.class(), "classified step");

            steps.push(estimate);
        }

        Ok(AnalysisResult::new(steps))
    }
}

/// Analyze `plan` with the default configuration.
pub fn estimate_complexity<P>(plan: &ExecutionPlan, provider: &P) -> Result<AnalysisResult>
where
    P: ExplainProvider + ?Sized,
{
    ComplexityAnalyzer::default().estimate_complexity(plan, provider)
}
