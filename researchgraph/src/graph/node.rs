//! Node trait: one unit of work, snapshot in, delta out.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::state::WorkflowState;

/// A unit of work in the workflow graph.
///
/// `run` receives an immutable snapshot of the current state (a clone, never
/// a live reference) and returns a partial update. A node must not assume
/// anything about when its delta is merged relative to other nodes in the
/// same step; merge order is fixed by registration order.
///
/// Returning `Err(ServiceError)` does not abort the run: the scheduler
/// substitutes an empty delta and records the node as degraded for that step.
///
/// **Interaction**: registered in `WorkflowGraph::add_node` as
/// `Arc<dyn Node<S>>`; executed by `CompiledWorkflow`.
#[async_trait]
pub trait Node<S: WorkflowState>: Send + Sync {
    /// Stable node id, matching the id used at registration.
    fn id(&self) -> &str;

    /// Executes one step: read the snapshot, call external services as needed,
    /// return a delta (possibly empty).
    async fn run(&self, snapshot: S) -> Result<S::Delta, ServiceError>;
}
