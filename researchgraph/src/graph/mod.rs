//! Workflow graph: nodes, edges, conditional routing, compile and run.
//!
//! Declare the control-flow skeleton with `WorkflowGraph` (use `START` and
//! `END` for entry/exit), then `compile()` to get a `CompiledWorkflow` that
//! drives the step loop: concurrent frontier execution, barrier, one atomic
//! merge per step, conditional routing on the merged state.

mod compile_error;
mod compiled;
pub mod logging;
mod node;
mod router;
mod run_context;
mod workflow_graph;

pub use compile_error::GraphError;
pub use compiled::{CancelToken, CompiledWorkflow, RunConfig};
pub use node::Node;
pub use router::Router;
pub use workflow_graph::{WorkflowGraph, END, START};
