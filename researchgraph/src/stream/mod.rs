//! Streaming types for workflow runs.
//!
//! Defines stream modes and the events emitted after each merge step. Used by
//! `CompiledWorkflow::stream` for progress UIs.

use std::fmt::Debug;

/// Stream mode selector: which kinds of events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Emit the full state snapshot after each merge step.
    Values,
    /// Emit one event per completed frontier node, with the merged state.
    Updates,
}

/// Event emitted while running a workflow.
///
/// Events are produced only after a merge completes, so every carried state
/// is a consistent snapshot; a partially-merged state is never observable.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Full state snapshot after one merge step.
    Values(S),
    /// One completed frontier node and the state after that step's merge.
    /// `degraded` marks nodes whose service call failed and contributed an
    /// empty delta.
    Updates {
        node_id: String,
        state: S,
        degraded: bool,
    },
}
