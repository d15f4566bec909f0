//! Writer node: synthesize accumulated findings into the final report.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::graph::Node;
use crate::service::LlmClient;
use crate::state::{AnalysisState, StateDelta};

/// Section name the full report draft is written under.
pub const FULL_DRAFT: &str = "full_draft";

/// Terminal synthesis step: combines both findings categories and writes the
/// report into `output_sections[full_draft]`.
///
/// An LLM failure falls back to a plain assembled report instead of degrading
/// the run; the terminal node always produces output.
pub struct WriterNode {
    llm: Arc<dyn LlmClient>,
}

impl WriterNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    fn prompt(snapshot: &AnalysisState, financial: &str, market: &str) -> String {
        let (company, ticker) = match &snapshot.subject {
            Some(s) => (s.company.as_str(), s.ticker.as_str()),
            None => ("", ""),
        };
        format!(
            "You are a senior investment analyst writing an investment memo for \
             {company} ({ticker}).\n\
             Synthesize the research below into a professional memo with sections: \
             Executive Summary, Company Overview, Market Analysis, Financial \
             Performance, Risks, Conclusion. Cite only the research provided.\n\n\
             ## Financial research\n{financial}\n\n## Market research\n{market}\n"
        )
    }

    fn fallback_memo(snapshot: &AnalysisState, financial: &str, market: &str) -> String {
        let heading = match &snapshot.subject {
            Some(s) => format!("# Investment Memo: {} ({})", s.company, s.ticker),
            None => "# Investment Memo".to_string(),
        };
        format!(
            "{heading}\n\n## Financial Performance\n\n{financial}\n\n\
             ## Market Analysis\n\n{market}\n"
        )
    }
}

#[async_trait]
impl Node<AnalysisState> for WriterNode {
    fn id(&self) -> &str {
        "write"
    }

    async fn run(&self, snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
        let financial = if snapshot.has_financial() {
            snapshot.financial_findings.join("\n\n")
        } else {
            "No financial data available.".to_string()
        };
        let market = if snapshot.has_market() {
            snapshot.market_findings.join("\n\n")
        } else {
            "No market research available.".to_string()
        };

        let memo = match self
            .llm
            .complete(&Self::prompt(&snapshot, &financial, &market))
            .await
        {
            Ok(memo) => memo,
            Err(_) => Self::fallback_memo(&snapshot, &financial, &market),
        };
        Ok(StateDelta::default().with_section(FULL_DRAFT, memo))
    }
}
