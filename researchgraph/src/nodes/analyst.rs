//! Financial analyst node: query ingested filings, extract structured answers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::graph::Node;
use crate::service::{LlmClient, RetrievalClient};
use crate::state::{AnalysisState, StateDelta};

/// Passages retrieved per query.
const RETRIEVAL_K: usize = 3;

/// Extracts financial data from ingested documents via vector retrieval.
///
/// Runs the canonical investor questions against the retrieval backend,
/// extracts an answer per question through the LLM, and appends one combined
/// entry to `financial_findings`. Queries with no matching passages are
/// recorded inline; a pass where nothing matches at all yields an empty delta.
pub struct FinancialAnalystNode {
    retrieval: Arc<dyn RetrievalClient>,
    llm: Arc<dyn LlmClient>,
}

impl FinancialAnalystNode {
    pub fn new(retrieval: Arc<dyn RetrievalClient>, llm: Arc<dyn LlmClient>) -> Self {
        Self { retrieval, llm }
    }

    fn queries(company: &str) -> [String; 4] {
        [
            format!("What is {company}'s revenue for the last 3 years?"),
            format!("What are the key risk factors for {company}?"),
            format!("What is {company}'s debt-to-equity ratio?"),
            format!("What are {company}'s operating margins?"),
        ]
    }
}

#[async_trait]
impl Node<AnalysisState> for FinancialAnalystNode {
    fn id(&self) -> &str {
        "financial_analysis"
    }

    async fn run(&self, snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
        let (company, ticker) = match &snapshot.subject {
            Some(s) => (s.company.as_str(), Some(s.ticker.as_str())),
            None => ("", None),
        };

        let mut findings = Vec::new();
        let mut any_hit = false;
        for query in Self::queries(company) {
            let passages = self.retrieval.similar(&query, ticker, RETRIEVAL_K).await?;
            if passages.is_empty() {
                findings.push(format!("**{query}**\nNo data available in document store."));
                continue;
            }
            any_hit = true;
            let context = passages.join("\n\n");
            let prompt = format!(
                "Answer the question strictly from the filing excerpts below.\n\
                 Question: {query}\nExcerpts:\n{context}"
            );
            let answer = self.llm.complete(&prompt).await?;
            findings.push(format!("**{query}**\n{answer}"));
        }

        if !any_hit {
            return Ok(StateDelta::default());
        }
        Ok(StateDelta::default().with_financial_finding(findings.join("\n\n")))
    }
}
