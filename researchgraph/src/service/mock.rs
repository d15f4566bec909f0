//! Mock service implementations for tests, examples, and offline runs.
//!
//! Each mock returns a canned response, can be told to fail (for degraded-run
//! coverage), and can delay its response to simulate completion-time jitter.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ServiceError;

use super::{LlmClient, RetrievalClient, SearchClient, SearchHit, SearchResponse};

async fn simulate_latency(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

/// Mock LLM: echoes a fixed reply, or fails.
pub struct MockLlm {
    reply: String,
    fail: bool,
    delay: Option<Duration>,
}

impl MockLlm {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail: false,
            delay: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
        simulate_latency(self.delay).await;
        if self.fail {
            return Err(ServiceError::CallFailed("mock llm failure".into()));
        }
        Ok(self.reply.clone())
    }
}

/// Mock web search: fixed answer and hits, empty, or failing.
pub struct MockSearch {
    response: SearchResponse,
    fail: bool,
    delay: Option<Duration>,
}

impl MockSearch {
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            response: SearchResponse {
                answer: Some(answer.into()),
                hits: vec![SearchHit {
                    title: "Mock coverage".into(),
                    url: "https://example.com/mock".into(),
                    snippet: "mock snippet".into(),
                }],
            },
            fail: false,
            delay: None,
        }
    }

    /// Search that finds nothing; the research node produces an empty delta.
    pub fn empty() -> Self {
        Self {
            response: SearchResponse::default(),
            fail: false,
            delay: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            response: SearchResponse::default(),
            fail: true,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl SearchClient for MockSearch {
    async fn search(&self, _query: &str) -> Result<SearchResponse, ServiceError> {
        simulate_latency(self.delay).await;
        if self.fail {
            return Err(ServiceError::CallFailed("mock search failure".into()));
        }
        Ok(self.response.clone())
    }
}

/// Mock retrieval: fixed passages, empty, or failing.
pub struct MockRetrieval {
    passages: Vec<String>,
    fail: bool,
    delay: Option<Duration>,
}

impl MockRetrieval {
    pub fn with_passages(passages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            passages: passages.into_iter().map(Into::into).collect(),
            fail: false,
            delay: None,
        }
    }

    /// Retrieval that finds nothing; the analyst node produces an empty delta.
    pub fn empty() -> Self {
        Self {
            passages: Vec::new(),
            fail: false,
            delay: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            passages: Vec::new(),
            fail: true,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl RetrievalClient for MockRetrieval {
    async fn similar(
        &self,
        _query: &str,
        _ticker: Option<&str>,
        k: usize,
    ) -> Result<Vec<String>, ServiceError> {
        simulate_latency(self.delay).await;
        if self.fail {
            return Err(ServiceError::CallFailed("mock retrieval failure".into()));
        }
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}
