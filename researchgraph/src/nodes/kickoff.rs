//! Kickoff node: marks the start of a research pass.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::graph::logging;
use crate::graph::Node;
use crate::state::{AnalysisState, StateDelta};

/// Lightweight node at the head of each research pass. Logs progress and
/// fans out to the parallel research nodes; contributes no state.
pub struct KickoffNode;

#[async_trait]
impl Node<AnalysisState> for KickoffNode {
    fn id(&self) -> &str {
        "kickoff"
    }

    async fn run(&self, snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
        logging::log_pass_start(snapshot.iteration_count + 1);
        Ok(StateDelta::default())
    }
}
