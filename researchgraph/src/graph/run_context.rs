//! Run context for streaming-aware execution.

use std::collections::HashSet;
use std::fmt::Debug;

use tokio::sync::mpsc;

use crate::state::WorkflowState;
use crate::stream::{StreamEvent, StreamMode};

/// Per-run streaming hookup: event sender plus the selected stream modes.
///
/// Present only for `CompiledWorkflow::stream` runs; `invoke` passes `None`.
pub(super) struct RunContext<S>
where
    S: WorkflowState + Debug,
{
    /// Sender for step events.
    pub stream_tx: mpsc::Sender<StreamEvent<S>>,
    /// Enabled stream modes (Values, Updates).
    pub stream_mode: HashSet<StreamMode>,
}
