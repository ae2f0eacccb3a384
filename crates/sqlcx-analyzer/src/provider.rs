//! The explain-provider seam.
//!
//! Real deployments back this with a database session running `EXPLAIN <query>`;
//! the analyzer only depends on the single `get_plan` call.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use sqlcx_core::error::ProviderError;
use sqlcx_core::plan::ExecutionPlan;

/// Returns the ordered plan for a query. Blocking; timeouts and retries are
/// the implementation's business.
pub trait ExplainProvider {
    fn get_plan(&self, query: &str) -> Result<ExecutionPlan, ProviderError>;
}

impl<P: ExplainProvider + ?Sized> ExplainProvider for Box<P> {
    fn get_plan(&self, query: &str) -> Result<ExecutionPlan, ProviderError> {
        (**self).get_plan(query)
    }
}

/// Adapts a closure into a provider.
pub struct FnProvider<F>(pub F);

impl<F> ExplainProvider for FnProvider<F>
where
    F: Fn(&str) -> Result<ExecutionPlan, ProviderError>,
{
    fn get_plan(&self, query: &str) -> Result<ExecutionPlan, ProviderError> {
        (self.0)(query)
    }
}

/// Canned plans keyed by exact query text. Unknown queries fail the way a
/// database would reject a statement it cannot explain.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    plans: BTreeMap<String, ExecutionPlan>,
    calls: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(mut self, query: impl Into<String>, plan: impl Into<ExecutionPlan>) -> Self {
        self.insert(query, plan);
        self
    }

    pub fn insert(&mut self, query: impl Into<String>, plan: impl Into<ExecutionPlan>) {
        self.plans.insert(query.into(), plan.into());
    }

    pub fn plans(&self) -> impl Iterator<Item = (&str, &ExecutionPlan)> {
        self.plans.iter().map(|(q, p)| (q.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Number of `get_plan` calls served so far (including failures).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl From<BTreeMap<String, ExecutionPlan>> for InMemoryProvider {
    fn from(plans: BTreeMap<String, ExecutionPlan>) -> Self {
        Self {
            plans,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ExplainProvider for InMemoryProvider {
    fn get_plan(&self, query: &str) -> Result<ExecutionPlan, ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.plans
            .get(query)
            .cloned()
            .ok_or_else(|| ProviderError::new(query, "no plan registered for query"))
    }
}
