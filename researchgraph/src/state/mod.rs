//! Workflow state: snapshot-in, delta-out.
//!
//! Nodes never mutate shared state. Each node receives a cloned snapshot and
//! returns a delta; the scheduler applies all of a step's deltas in one
//! atomic `merge_step` call, in node-registration order. The merge policies
//! (replace / append / key-wise replace / summed counter) live entirely in
//! the state type's `WorkflowState` implementation.

mod analysis;

pub use analysis::{AnalysisState, StateDelta, Subject};

use thiserror::Error;

/// Two nodes in the same scheduling step wrote the same replace-policy field.
///
/// Ambiguous intent is never silently resolved: the scheduler aborts the run
/// with this conflict instead of picking a winner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("merge conflict on `{field}`: written by `{first}` and `{second}` in the same step")]
pub struct MergeConflict {
    /// Field name, e.g. `sufficiency` or `output_sections[full_draft]`.
    pub field: String,
    /// Id of the node whose delta wrote the field first (registration order).
    pub first: String,
    /// Id of the conflicting node.
    pub second: String,
}

/// State type driven through a workflow graph.
///
/// The scheduler owns the state exclusively; nodes see clones. `merge_step`
/// receives every delta of one step, tagged with the producing node's id and
/// already ordered by node registration, and must apply them atomically:
/// either all deltas merge, or the state is left untouched and a
/// `MergeConflict` is returned.
///
/// **Interaction**: implemented by `AnalysisState`; consumed by
/// `CompiledWorkflow::invoke` / `stream`.
pub trait WorkflowState: Clone + Send + Sync + 'static {
    /// Partial update produced by a single node. `Default` is the empty delta,
    /// which is also what a degraded (failed) node contributes.
    type Delta: Default + Send + 'static;

    /// Applies one step's deltas in the given order.
    fn merge_step(&mut self, deltas: Vec<(String, Self::Delta)>) -> Result<(), MergeConflict>;

    /// Number of completed research passes; read by the scheduler to enforce
    /// the iteration ceiling independently of node behavior.
    fn iteration_count(&self) -> u32;
}
