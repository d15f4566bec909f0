//! Logging utilities for workflow execution.
//!
//! Provides structured logging for run lifecycle, step frontiers, degraded
//! nodes, merges, and forced routing.

/// Log the start of a scheduling step with its frontier node ids.
pub fn log_step_start(frontier: &[String]) {
    #[cfg(feature = "tracing")]
    tracing::debug!(?frontier, "Starting step");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Starting step: {:?}", frontier);
}

/// Log a node whose service call failed; its delta is replaced by an empty one.
pub fn log_node_degraded(node_id: &str, error: &crate::error::ServiceError) {
    #[cfg(feature = "tracing")]
    tracing::warn!(node_id, %error, "Node degraded, continuing with empty delta");

    #[cfg(not(feature = "tracing"))]
    eprintln!(
        "[WARN] Node degraded, continuing with empty delta: {} ({})",
        node_id, error
    );
}

/// Log the merge of one step's deltas into the shared state.
pub fn log_merge_applied(frontier: &[String]) {
    #[cfg(feature = "tracing")]
    tracing::debug!(?frontier, "Step deltas merged");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Step deltas merged: {:?}", frontier);
}

/// Log the scheduler overriding the routers because the iteration ceiling was hit.
pub fn log_forced_route(terminal: &str, iterations: u32) {
    #[cfg(feature = "tracing")]
    tracing::warn!(terminal, iterations, "Iteration ceiling reached, forcing terminal node");

    #[cfg(not(feature = "tracing"))]
    eprintln!(
        "[WARN] Iteration ceiling reached at {} passes, forcing terminal node: {}",
        iterations, terminal
    );
}

/// Log the start of a research pass (used by the kickoff node).
pub fn log_pass_start(iteration: u32) {
    #[cfg(feature = "tracing")]
    tracing::info!(iteration, "Starting research pass");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Starting research pass {}", iteration);
}

/// Log workflow run start.
pub fn log_run_start() {
    #[cfg(feature = "tracing")]
    tracing::info!("Starting workflow run");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Starting workflow run");
}

/// Log workflow run completion.
pub fn log_run_complete() {
    #[cfg(feature = "tracing")]
    tracing::info!("Workflow run complete");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Workflow run complete");
}

/// Log a fatal workflow error.
pub fn log_run_error(error: &crate::error::RunError) {
    #[cfg(feature = "tracing")]
    tracing::error!(?error, "Workflow run error");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[ERROR] Workflow run error: {:?}", error);
}
