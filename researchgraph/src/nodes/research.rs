//! Web research node: search the web, synthesize one market finding.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::graph::Node;
use crate::service::{LlmClient, SearchClient, SearchResponse};
use crate::state::{AnalysisState, StateDelta};

/// Gathers market intelligence: one search per pass, synthesized by the LLM
/// into a single entry appended to `market_findings`.
///
/// A pass that finds nothing yields an empty delta (no fabricated findings);
/// a failed search or synthesis surfaces as `ServiceError`, which the
/// scheduler records as a degraded step.
pub struct WebResearchNode {
    search: Arc<dyn SearchClient>,
    llm: Arc<dyn LlmClient>,
}

impl WebResearchNode {
    pub fn new(search: Arc<dyn SearchClient>, llm: Arc<dyn LlmClient>) -> Self {
        Self { search, llm }
    }

    fn query(snapshot: &AnalysisState) -> String {
        let (company, ticker) = match &snapshot.subject {
            Some(s) => (s.company.as_str(), s.ticker.as_str()),
            None => ("", ""),
        };
        format!("{company} {ticker} market analysis recent news competitors financial performance")
    }

    fn synthesis_prompt(snapshot: &AnalysisState, response: &SearchResponse) -> String {
        let company = snapshot
            .subject
            .as_ref()
            .map(|s| s.company.as_str())
            .unwrap_or("");
        let mut prompt = format!(
            "Synthesize the following market research on {company} into concise insights.\n"
        );
        if let Some(answer) = &response.answer {
            prompt.push_str("Search summary:\n");
            prompt.push_str(answer);
            prompt.push('\n');
        }
        for hit in &response.hits {
            prompt.push_str(&format!("- {} ({}): {}\n", hit.title, hit.url, hit.snippet));
        }
        prompt
    }
}

#[async_trait]
impl Node<AnalysisState> for WebResearchNode {
    fn id(&self) -> &str {
        "web_research"
    }

    async fn run(&self, snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
        let response = self.search.search(&Self::query(&snapshot)).await?;
        if response.is_empty() {
            return Ok(StateDelta::default());
        }
        let synthesis = self
            .llm
            .complete(&Self::synthesis_prompt(&snapshot, &response))
            .await?;
        Ok(StateDelta::default().with_market_finding(synthesis))
    }
}
