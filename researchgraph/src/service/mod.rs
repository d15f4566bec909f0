//! External-service capability traits consumed by nodes.
//!
//! The orchestration core is agnostic to what a node does internally; these
//! narrow interfaces are where real backends (web search, vector store, LLM)
//! plug in. Every call can fail with `ServiceError`, which the scheduler
//! contains per node.

mod mock;

pub use mock::{MockLlm, MockRetrieval, MockSearch};

use async_trait::async_trait;

use crate::error::ServiceError;

/// One web search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Response from a web search: optional synthesized answer plus ranked hits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResponse {
    /// Search-engine-synthesized answer, when the backend provides one.
    pub answer: Option<String>,
    pub hits: Vec<SearchHit>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.answer.is_none() && self.hits.is_empty()
    }
}

/// LLM completion client: prompt in, text out.
///
/// **Interaction**: used by the research nodes for synthesis/extraction and
/// by the writer node for the final report.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Web search client.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, ServiceError>;
}

/// Vector-similarity retrieval over ingested documents.
///
/// `ticker` narrows retrieval to one subject's filings; `k` is the maximum
/// number of passages returned.
#[async_trait]
pub trait RetrievalClient: Send + Sync {
    async fn similar(
        &self,
        query: &str,
        ticker: Option<&str>,
        k: usize,
    ) -> Result<Vec<String>, ServiceError>;
}
