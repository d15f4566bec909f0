//! Compiled workflow: immutable structure, frontier scheduler.
//!
//! Built by `WorkflowGraph::compile`. Each scheduling step runs every frontier
//! node concurrently on a cloned snapshot, waits for all of them (barrier),
//! merges their deltas atomically in node-registration order, then evaluates
//! conditional routers against the merged state to compute the next frontier.
//! The merge is the single synchronization point for state mutation; nodes
//! never see a mutable reference.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{RunError, ServiceError};
use crate::state::WorkflowState;
use crate::stream::{StreamEvent, StreamMode};

use super::logging;
use super::node::Node;
use super::router::ConditionalEdge;
use super::run_context::RunContext;
use super::END;

/// Cooperative cancellation handle for a run.
///
/// Cancellation takes effect at the next step boundary, never mid-merge:
/// in-flight node calls are not interrupted, their results are discarded.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the run stops before its next step.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-run configuration for the scheduler.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Maximum number of research passes; once `iteration_count` reaches it,
    /// the scheduler force-routes to the terminal node regardless of any
    /// router verdict.
    pub iteration_ceiling: u32,
    /// Optional cancellation handle, observed at step boundaries.
    pub cancel: Option<CancelToken>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iteration_ceiling: 3,
            cancel: None,
        }
    }
}

impl RunConfig {
    pub fn with_ceiling(iteration_ceiling: u32) -> Self {
        Self {
            iteration_ceiling,
            ..Self::default()
        }
    }
}

/// Compiled workflow: immutable, supports `invoke` and `stream`.
///
/// Created by `WorkflowGraph::compile()`. Owns the state for the duration of
/// a run; nodes receive cloned snapshots and return deltas.
pub struct CompiledWorkflow<S: WorkflowState> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Node ids in registration order; fixes merge and event order.
    pub(super) order: Vec<String>,
    pub(super) successors: HashMap<String, Vec<String>>,
    pub(super) predecessors: HashMap<String, Vec<String>>,
    pub(super) conditional: HashMap<String, ConditionalEdge<S>>,
    pub(super) entry: String,
    pub(super) terminal: String,
}

impl<S: WorkflowState> Clone for CompiledWorkflow<S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            order: self.order.clone(),
            successors: self.successors.clone(),
            predecessors: self.predecessors.clone(),
            conditional: self.conditional.clone(),
            entry: self.entry.clone(),
            terminal: self.terminal.clone(),
        }
    }
}

impl<S> CompiledWorkflow<S>
where
    S: WorkflowState + Debug,
{
    /// Shared step loop used by invoke() and stream().
    async fn run_loop_inner(
        &self,
        state: &mut S,
        config: &RunConfig,
        run_ctx: Option<&RunContext<S>>,
    ) -> Result<(), RunError> {
        // Structural backstop: bounds runs whose nodes never increment the
        // iteration counter. Generous enough to never fire on a conforming graph.
        let max_steps = (config.iteration_ceiling as usize + 1) * self.order.len() + 2;

        let mut frontier = vec![self.entry.clone()];
        let mut steps = 0usize;

        loop {
            if let Some(token) = &config.cancel {
                if token.is_cancelled() {
                    return Err(RunError::Cancelled);
                }
            }
            steps += 1;
            logging::log_step_start(&frontier);

            // Fan-out: every frontier node runs concurrently on its own snapshot.
            let running = frontier.iter().map(|id| {
                let node = self
                    .nodes
                    .get(id)
                    .expect("compiled workflow has all nodes")
                    .clone();
                let snapshot = state.clone();
                let id = id.clone();
                async move {
                    let result = node.run(snapshot).await;
                    (id, result)
                }
            });
            // Barrier: all frontier results collected before anything merges.
            let mut results: HashMap<String, Result<S::Delta, ServiceError>> =
                join_all(running).await.into_iter().collect();

            // Deltas ordered by registration, not completion, so the merged
            // state is reproducible under completion-time jitter.
            let mut deltas: Vec<(String, S::Delta)> = Vec::with_capacity(frontier.len());
            let mut degraded: HashSet<String> = HashSet::new();
            for id in &frontier {
                match results.remove(id) {
                    Some(Ok(delta)) => deltas.push((id.clone(), delta)),
                    Some(Err(err)) => {
                        logging::log_node_degraded(id, &err);
                        degraded.insert(id.clone());
                        deltas.push((id.clone(), S::Delta::default()));
                    }
                    None => unreachable!("every frontier node produced a result"),
                }
            }

            state.merge_step(deltas)?;
            logging::log_merge_applied(&frontier);

            if let Some(ctx) = run_ctx {
                if ctx.stream_mode.contains(&StreamMode::Values) {
                    let _ = ctx.stream_tx.send(StreamEvent::Values(state.clone())).await;
                }
                if ctx.stream_mode.contains(&StreamMode::Updates) {
                    for id in &frontier {
                        let _ = ctx
                            .stream_tx
                            .send(StreamEvent::Updates {
                                node_id: id.clone(),
                                state: state.clone(),
                                degraded: degraded.contains(id),
                            })
                            .await;
                    }
                }
            }

            // Routing happens on the just-merged state.
            let mut next: Vec<String> = Vec::new();
            for id in &frontier {
                if let Some(edge) = self.conditional.get(id) {
                    let target = (edge.router)(state);
                    if !edge.allowed.contains(&target) {
                        return Err(RunError::RouterContract {
                            node: id.clone(),
                            returned: target,
                        });
                    }
                    if target != END && !next.contains(&target) {
                        next.push(target);
                    }
                }
                for target in self.successors.get(id).into_iter().flatten() {
                    if next.contains(target) {
                        continue;
                    }
                    // Fan-in: a successor only becomes ready once all of its
                    // predecessors completed in this step.
                    let ready = self
                        .predecessors
                        .get(target)
                        .map_or(true, |preds| preds.iter().all(|p| frontier.contains(p)));
                    if ready {
                        next.push(target.clone());
                    }
                }
            }

            if next.is_empty() {
                return Ok(());
            }

            let ceiling_hit = state.iteration_count() >= config.iteration_ceiling;
            if (ceiling_hit || steps >= max_steps) && !next.contains(&self.terminal) {
                logging::log_forced_route(&self.terminal, state.iteration_count());
                next = vec![self.terminal.clone()];
            }

            frontier = self.in_registration_order(next);
        }
    }

    fn in_registration_order(&self, ids: Vec<String>) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| ids.contains(*id))
            .cloned()
            .collect()
    }

    /// Runs the workflow to completion and returns the final state.
    ///
    /// The run either completes with a (possibly degraded) final state or
    /// fails fast with a fatal `RunError`; a partially-merged state is never
    /// observable.
    pub async fn invoke(&self, state: S, config: RunConfig) -> Result<S, RunError> {
        if self.order.is_empty() {
            return Err(RunError::EmptyGraph);
        }
        logging::log_run_start();
        let mut state = state;
        match self.run_loop_inner(&mut state, &config, None).await {
            Ok(()) => {
                logging::log_run_complete();
                Ok(state)
            }
            Err(err) => {
                logging::log_run_error(&err);
                Err(err)
            }
        }
    }

    /// Streams workflow execution, emitting events via a channel-backed stream.
    ///
    /// The stream is finite (bounded by graph termination) and yields, per
    /// merge step, a `Values` snapshot and/or one `Updates` event per
    /// completed frontier node, depending on `stream_mode`. A fatal run error
    /// simply ends the stream; no event past the last valid merge is emitted.
    pub fn stream(
        &self,
        state: S,
        config: RunConfig,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(128);
        let workflow = self.clone();
        let mode_set: HashSet<StreamMode> = stream_mode.into();

        tokio::spawn(async move {
            if workflow.order.is_empty() {
                return;
            }
            let run_ctx = RunContext {
                stream_tx: tx,
                stream_mode: mode_set,
            };
            let mut state = state;
            if let Err(err) = workflow
                .run_loop_inner(&mut state, &config, Some(&run_ctx))
                .await
            {
                logging::log_run_error(&err);
            }
        });

        ReceiverStream::new(rx)
    }
}
