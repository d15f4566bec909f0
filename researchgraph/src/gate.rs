//! Quality gate: pure sufficiency decision over the accumulated state.
//!
//! Consulted by the evaluate node each pass; the verdict is written into the
//! state and read by the conditional edge leaving evaluation. The gate itself
//! keeps no state of its own.

use crate::state::AnalysisState;

/// Outcome of a sufficiency assessment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Loop back for another research pass.
    ContinueResearch,
    /// Accumulated findings are enough; proceed to final synthesis.
    ProceedToWrite,
}

/// Sufficiency policy knobs.
///
/// `allow_partial` controls whether a single populated findings category may
/// short-circuit before the ceiling; with the default (`false`) both
/// categories are required.
#[derive(Clone, Copy, Debug)]
pub struct SufficiencyPolicy {
    /// Minimum completed passes before findings can count as sufficient.
    pub min_iterations: u32,
    /// Pass count at which the verdict is ProceedToWrite unconditionally,
    /// even with empty findings (forced progress).
    pub ceiling: u32,
    /// Accept one non-empty findings category instead of both.
    pub allow_partial: bool,
}

impl Default for SufficiencyPolicy {
    fn default() -> Self {
        Self {
            min_iterations: 1,
            ceiling: 3,
            allow_partial: false,
        }
    }
}

impl SufficiencyPolicy {
    pub fn with_ceiling(ceiling: u32) -> Self {
        Self {
            ceiling,
            ..Self::default()
        }
    }
}

/// Pure decision: is the accumulated state sufficient to write the report?
///
/// Sufficient when the required findings categories are non-empty and at
/// least `min_iterations` passes completed, or unconditionally once the
/// iteration count reaches the ceiling.
pub fn assess(state: &AnalysisState, policy: &SufficiencyPolicy) -> Verdict {
    if state.iteration_count >= policy.ceiling {
        return Verdict::ProceedToWrite;
    }
    let covered = if policy.allow_partial {
        state.has_financial() || state.has_market()
    } else {
        state.has_financial() && state.has_market()
    };
    if covered && state.iteration_count >= policy.min_iterations {
        Verdict::ProceedToWrite
    } else {
        Verdict::ContinueResearch
    }
}
