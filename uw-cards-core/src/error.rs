use thiserror::Error;

/// Errors raised while adapting upstream records.
///
/// Any of these means the upstream schema changed; the locale must not be
/// merged.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required key is missing or has the wrong shape
    #[error("Upstream record #{index} is malformed: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A taxonomy list that must have at least one entry is empty
    #[error("Upstream card {card} has an empty '{field}' list")]
    EmptyList { card: i64, field: &'static str },
}

/// Fatal reconciliation failures.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Nothing to reconcile against, usually because the fetch failed
    #[error("Upstream card list is empty")]
    EmptyUpstream,

    /// A local card matched neither an upstream name nor an upstream number
    #[error("Card '{name}' (#{number}) matches no upstream name or number")]
    Unresolved { name: String, number: i64 },
}
