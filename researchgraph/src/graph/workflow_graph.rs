//! Workflow graph builder: nodes + explicit edges (from → to) + conditional edges.
//!
//! Add nodes with `add_node`, wire the flow with `add_edge(from, to)` using
//! `START` and `END` for graph entry/exit, attach routers with
//! `add_conditional_edge`, then `compile` to get a `CompiledWorkflow`.
//! Fan-out is two edges from the same node; fan-in is two edges to the same
//! node (the scheduler waits for all predecessors before running it).

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::graph::compile_error::GraphError;
use crate::graph::compiled::CompiledWorkflow;
use crate::graph::node::Node;
use crate::graph::router::{ConditionalEdge, Router};
use crate::state::WorkflowState;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(terminal_node_id, END)`.
pub const END: &str = "__end__";

/// Declarative control-flow skeleton, built before execution.
///
/// Generic over state type `S`. Duplicate and unknown ids are rejected as the
/// graph is declared; structural validation (single entry, single terminal
/// with no outgoing edges, reachability) happens in `compile()`.
///
/// **Interaction**: accepts `Arc<dyn Node<S>>`; produces `CompiledWorkflow<S>`.
pub struct WorkflowGraph<S: WorkflowState> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Node ids in registration order; fixes the merge order at run time.
    order: Vec<String>,
    /// Unconditional edges (from_id, to_id).
    edges: Vec<(String, String)>,
    /// At most one conditional edge per from-node.
    conditional: HashMap<String, ConditionalEdge<S>>,
}

impl<S: WorkflowState> Default for WorkflowGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WorkflowState> WorkflowGraph<S> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            edges: Vec::new(),
            conditional: HashMap::new(),
        }
    }

    /// Registers a node; the id must be unique.
    ///
    /// Registration order is significant: it fixes the order in which a
    /// step's deltas are merged, regardless of completion order.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        node: Arc<dyn Node<S>>,
    ) -> Result<&mut Self, GraphError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.order.push(id.clone());
        self.nodes.insert(id, node);
        Ok(self)
    }

    /// Adds an unconditional edge from `from_id` to `to_id`.
    ///
    /// Use `START` for graph entry and `END` for graph exit. Both ids (except
    /// the sentinels) must already be registered.
    pub fn add_edge(
        &mut self,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
    ) -> Result<&mut Self, GraphError> {
        let from = from_id.into();
        let to = to_id.into();
        if from != START && !self.nodes.contains_key(&from) {
            return Err(GraphError::UnknownNode(from));
        }
        if to != END && !self.nodes.contains_key(&to) {
            return Err(GraphError::UnknownNode(to));
        }
        self.edges.push((from, to));
        Ok(self)
    }

    /// Adds a conditional edge: after `from_id` completes, `router` picks the
    /// next node from `allowed_targets` based on the just-merged state.
    ///
    /// All targets must be registered (or `END`). At run time a router return
    /// value outside `allowed_targets` aborts the run with
    /// `RunError::RouterContract`.
    pub fn add_conditional_edge(
        &mut self,
        from_id: impl Into<String>,
        router: Router<S>,
        allowed_targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<&mut Self, GraphError> {
        let from = from_id.into();
        if !self.nodes.contains_key(&from) {
            return Err(GraphError::UnknownNode(from));
        }
        let allowed: Vec<String> = allowed_targets.into_iter().map(Into::into).collect();
        for target in &allowed {
            if target != END && !self.nodes.contains_key(target) {
                return Err(GraphError::UnknownNode(target.clone()));
            }
        }
        if self.conditional.contains_key(&from) {
            return Err(GraphError::DuplicateRouter(from));
        }
        self.conditional.insert(from, ConditionalEdge { router, allowed });
        Ok(self)
    }

    /// Builds the executable workflow.
    ///
    /// Validates that there is exactly one edge from START and one to END,
    /// that the terminal node (the one feeding END) has no other outgoing
    /// edges, and that every registered node is reachable from the entry over
    /// unconditional edges and conditional allowed-target sets. On success the
    /// graph is immutable and ready to `invoke` or `stream`.
    pub fn compile(self) -> Result<CompiledWorkflow<S>, GraphError> {
        let start_edges: Vec<_> = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t.clone())
            .collect();
        if start_edges.len() != 1 {
            return Err(GraphError::MissingStart);
        }
        let entry = start_edges.into_iter().next().unwrap();

        let end_edges: Vec<_> = self
            .edges
            .iter()
            .filter(|(_, t)| t == END)
            .map(|(f, _)| f.clone())
            .collect();
        if end_edges.len() != 1 {
            return Err(GraphError::MissingTerminal);
        }
        let terminal = end_edges.into_iter().next().unwrap();

        let has_other_outgoing = self
            .edges
            .iter()
            .any(|(f, t)| f == &terminal && t != END)
            || self.conditional.contains_key(&terminal);
        if has_other_outgoing {
            return Err(GraphError::TerminalNotFinal(terminal));
        }

        // Adjacency over real nodes only; END is implicit in `terminal`.
        let mut successors: HashMap<String, Vec<String>> = HashMap::new();
        let mut predecessors: HashMap<String, Vec<String>> = HashMap::new();
        for (from, to) in &self.edges {
            if from == START || to == END {
                continue;
            }
            successors.entry(from.clone()).or_default().push(to.clone());
            predecessors.entry(to.clone()).or_default().push(from.clone());
        }

        let mut reachable: HashSet<String> = HashSet::new();
        let mut queue = VecDeque::from([entry.clone()]);
        while let Some(id) = queue.pop_front() {
            if !reachable.insert(id.clone()) {
                continue;
            }
            if let Some(next) = successors.get(&id) {
                queue.extend(next.iter().cloned());
            }
            if let Some(edge) = self.conditional.get(&id) {
                queue.extend(edge.allowed.iter().filter(|t| *t != END).cloned());
            }
        }
        for id in &self.order {
            if !reachable.contains(id) {
                return Err(GraphError::Unreachable(id.clone()));
            }
        }

        Ok(CompiledWorkflow {
            nodes: self.nodes,
            order: self.order,
            successors,
            predecessors,
            conditional: self.conditional,
            entry,
            terminal,
        })
    }
}
