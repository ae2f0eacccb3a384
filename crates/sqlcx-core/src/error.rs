use thiserror::Error;

/// Canonical result for sqlcx.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The explain provider could not produce a plan. Never masked by the analyzer.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// `query` names the subquery whose plan held the step; `None` for the
    /// top-level plan. Nested errors keep the innermost query.
    #[error("malformed plan step #{index}{}: {reason}", origin(.query))]
    MalformedPlan {
        index: usize,
        query: Option<String>,
        reason: String,
    },

    #[error("subquery nesting exceeded limit of {limit} while resolving `{query}`")]
    RecursionLimit { limit: usize, query: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Failure reported by an `ExplainProvider` (bad syntax, lost connection, permissions).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not explain `{query}`: {message}")]
pub struct ProviderError {
    pub query: String,
    pub message: String,
}

impl ProviderError {
    pub fn new(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            message: message.into(),
        }
    }
}

fn origin(query: &Option<String>) -> String {
    match query {
        Some(q) => format!(" in subquery `{q}`"),
        None => String::new(),
    }
}

impl Error {
    /// Attribute a malformed-step error from a nested plan to `query`.
    /// Errors already attributed deeper, and other kinds, pass through.
    pub fn in_subquery(self, query: &str) -> Self {
        match self {
            Error::MalformedPlan {
                index,
                query: None,
                reason,
            } => Error::MalformedPlan {
                index,
                query: Some(query.to_string()),
                reason,
            },
            other => other,
        }
    }

    /// True for errors caused by the plan data itself rather than the provider.
    pub fn is_plan_error(&self) -> bool {
        matches!(self, Error::MalformedPlan { .. } | Error::RecursionLimit { .. })
    }
}
