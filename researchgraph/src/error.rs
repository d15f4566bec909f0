//! Run and service error types.
//!
//! `RunError` covers fatal control-flow failures raised by the scheduler;
//! `ServiceError` covers external-service failures inside a node, which the
//! scheduler contains as a degraded (empty-delta) contribution.

use thiserror::Error;

use crate::state::MergeConflict;

/// Fatal error while executing a compiled workflow.
///
/// Only structural/control-flow violations abort a run; a node's
/// `ServiceError` never surfaces here (it degrades that node's step instead).
#[derive(Debug, Error)]
pub enum RunError {
    /// A conditional router returned a target outside its declared allowed set.
    #[error("router on node `{node}` returned undeclared target `{returned}`")]
    RouterContract { node: String, returned: String },

    /// Two nodes in the same step wrote the same replace-policy field.
    #[error(transparent)]
    MergeConflict(#[from] MergeConflict),

    /// The compiled workflow has no nodes to run.
    #[error("empty workflow")]
    EmptyGraph,

    /// The run was cancelled at a step boundary.
    #[error("run cancelled")]
    Cancelled,
}

/// Error from an external-service call made inside a node.
///
/// Raised by `LlmClient` / `SearchClient` / `RetrievalClient` implementations
/// and propagated out of `Node::run`. The scheduler treats it as an empty
/// delta and marks the node degraded for that step; the run continues.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The call itself failed (network, backend, timeout).
    #[error("service call failed: {0}")]
    CallFailed(String),

    /// The service answered with something the node could not use.
    #[error("malformed service response: {0}")]
    InvalidResponse(String),
}
