//! Analysis state: the evolving record of one research run.
//!
//! Field-by-field merge policies:
//! - `subject`: replace-on-write, one writer per step.
//! - `financial_findings` / `market_findings`: append, never shrink.
//! - `output_sections`: key-wise replace, one writer per key per step.
//! - `iteration_count`: sum of per-delta increments.
//! - `sufficiency`: replace-on-write, one writer per step (the quality gate).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{MergeConflict, WorkflowState};

/// Research target: company name plus stock ticker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub company: String,
    pub ticker: String,
}

impl Subject {
    pub fn new(company: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            ticker: ticker.into(),
        }
    }
}

/// Shared state accumulated across research passes.
///
/// Created empty (or seeded with a subject) at run start, mutated solely by
/// the scheduler's merge step, final once the terminal node completes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisState {
    /// Research target; seeded at run start.
    pub subject: Option<Subject>,
    /// Findings from document/vector retrieval, in node-completion provenance order.
    pub financial_findings: Vec<String>,
    /// Findings from web research, same append policy.
    pub market_findings: Vec<String>,
    /// Report sections by name (e.g. `full_draft`).
    pub output_sections: BTreeMap<String, String>,
    /// Completed research passes.
    pub iteration_count: u32,
    /// Quality-gate verdict from the latest evaluation pass.
    pub sufficiency: bool,
}

impl AnalysisState {
    /// State seeded with the research target, everything else empty.
    pub fn for_subject(company: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            subject: Some(Subject::new(company, ticker)),
            ..Self::default()
        }
    }

    pub fn has_financial(&self) -> bool {
        !self.financial_findings.is_empty()
    }

    pub fn has_market(&self) -> bool {
        !self.market_findings.is_empty()
    }
}

/// Partial update returned by one node's execution.
///
/// `Default` is the empty delta. Builder methods cover the common
/// single-field updates nodes produce.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDelta {
    pub subject: Option<Subject>,
    pub financial_findings: Vec<String>,
    pub market_findings: Vec<String>,
    pub output_sections: BTreeMap<String, String>,
    pub iteration_increment: u32,
    pub sufficiency: Option<bool>,
}

impl StateDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_financial_finding(mut self, finding: impl Into<String>) -> Self {
        self.financial_findings.push(finding.into());
        self
    }

    pub fn with_market_finding(mut self, finding: impl Into<String>) -> Self {
        self.market_findings.push(finding.into());
        self
    }

    pub fn with_section(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.output_sections.insert(name.into(), text.into());
        self
    }

    pub fn with_iteration(mut self) -> Self {
        self.iteration_increment += 1;
        self
    }

    pub fn with_sufficiency(mut self, sufficient: bool) -> Self {
        self.sufficiency = Some(sufficient);
        self
    }
}

impl WorkflowState for AnalysisState {
    type Delta = StateDelta;

    /// Applies one step's deltas. Conflicts are detected before anything is
    /// applied, so a failing merge leaves the state untouched.
    fn merge_step(&mut self, deltas: Vec<(String, StateDelta)>) -> Result<(), MergeConflict> {
        let mut subject_writer: Option<&str> = None;
        let mut sufficiency_writer: Option<&str> = None;
        let mut section_writers: BTreeMap<&str, &str> = BTreeMap::new();

        for (node, delta) in &deltas {
            if delta.subject.is_some() {
                if let Some(first) = subject_writer.replace(node.as_str()) {
                    return Err(conflict("subject", first, node));
                }
            }
            if delta.sufficiency.is_some() {
                if let Some(first) = sufficiency_writer.replace(node.as_str()) {
                    return Err(conflict("sufficiency", first, node));
                }
            }
            for key in delta.output_sections.keys() {
                if let Some(first) = section_writers.insert(key.as_str(), node.as_str()) {
                    return Err(conflict(&format!("output_sections[{key}]"), first, node));
                }
            }
        }

        for (_, delta) in deltas {
            if let Some(subject) = delta.subject {
                self.subject = Some(subject);
            }
            self.financial_findings.extend(delta.financial_findings);
            self.market_findings.extend(delta.market_findings);
            self.output_sections.extend(delta.output_sections);
            self.iteration_count += delta.iteration_increment;
            if let Some(sufficiency) = delta.sufficiency {
                self.sufficiency = sufficiency;
            }
        }
        Ok(())
    }

    fn iteration_count(&self) -> u32 {
        self.iteration_count
    }
}

fn conflict(field: &str, first: &str, second: &str) -> MergeConflict {
    MergeConflict {
        field: field.to_string(),
        first: first.to_string(),
        second: second.to_string(),
    }
}
