//! Evaluate node: apply the quality gate, record the verdict.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::gate::{assess, SufficiencyPolicy, Verdict};
use crate::graph::Node;
use crate::state::{AnalysisState, StateDelta};

/// Closes a research pass: bumps the iteration counter and writes the quality
/// gate's verdict into `sufficiency`.
///
/// The gate is assessed against the state as it will look after this pass is
/// counted, so one completed pass with both findings categories populated is
/// already sufficient under the default policy.
pub struct EvaluateNode {
    policy: SufficiencyPolicy,
}

impl EvaluateNode {
    pub fn new(policy: SufficiencyPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Node<AnalysisState> for EvaluateNode {
    fn id(&self) -> &str {
        "evaluate"
    }

    async fn run(&self, snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
        let mut projected = snapshot;
        projected.iteration_count += 1;
        let verdict = assess(&projected, &self.policy);
        Ok(StateDelta::default()
            .with_iteration()
            .with_sufficiency(verdict == Verdict::ProceedToWrite))
    }
}
