//! Graph construction and compilation errors.
//!
//! Structural misconfiguration is always caught while building or compiling,
//! never at run time: `add_node`/`add_edge` reject duplicate and unknown ids
//! eagerly, `compile` validates entry, terminal, and reachability.

use thiserror::Error;

/// Error while declaring or compiling a workflow graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// `add_node` was called twice with the same id.
    #[error("node already registered: {0}")]
    DuplicateNode(String),

    /// An edge or conditional edge referenced an id never passed to `add_node`
    /// (and not START/END).
    #[error("node not found: {0}")]
    UnknownNode(String),

    /// A node already has a conditional edge; at most one router per node.
    #[error("node already has a conditional edge: {0}")]
    DuplicateRouter(String),

    /// No edge from START, or more than one.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// No edge to END, or more than one.
    #[error("graph must have exactly one edge to END")]
    MissingTerminal,

    /// The terminal node (the one with the edge to END) has other outgoing edges.
    #[error("terminal node must have no outgoing edges: {0}")]
    TerminalNotFinal(String),

    /// A registered node cannot be reached from the entry node.
    #[error("node not reachable from entry: {0}")]
    Unreachable(String),
}
