//! Shared stub nodes and graph builders for workflow integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use researchgraph::{
    AnalysisState, CompiledWorkflow, EvaluateNode, KickoffNode, MockLlm, Node, ServiceError,
    StateDelta, SufficiencyPolicy, WorkflowGraph, WriterNode, END, EVALUATE, FINANCIAL_ANALYSIS,
    KICKOFF, START, WEB_RESEARCH, WRITE,
};

/// Which findings list a stub contributes to.
#[derive(Clone, Copy)]
pub enum Category {
    Financial,
    Market,
}

/// Research stand-in: appends one fixed finding per pass, optionally after a
/// delay (to simulate completion-time jitter).
pub struct FindingStub {
    pub id: &'static str,
    pub category: Category,
    pub text: &'static str,
    pub delay: Option<Duration>,
}

impl FindingStub {
    pub fn new(id: &'static str, category: Category, text: &'static str) -> Self {
        Self {
            id,
            category,
            text,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl Node<AnalysisState> for FindingStub {
    fn id(&self) -> &str {
        self.id
    }

    async fn run(&self, _snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(match self.category {
            Category::Financial => StateDelta::default().with_financial_finding(self.text),
            Category::Market => StateDelta::default().with_market_finding(self.text),
        })
    }
}

/// Research stand-in that never finds anything.
pub struct EmptyStub {
    pub id: &'static str,
}

#[async_trait]
impl Node<AnalysisState> for EmptyStub {
    fn id(&self) -> &str {
        self.id
    }

    async fn run(&self, _snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
        Ok(StateDelta::default())
    }
}

/// Research stand-in whose backing service is down.
pub struct FailingStub {
    pub id: &'static str,
}

#[async_trait]
impl Node<AnalysisState> for FailingStub {
    fn id(&self) -> &str {
        self.id
    }

    async fn run(&self, _snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
        Err(ServiceError::CallFailed("backend down".into()))
    }
}

/// Builds the research-loop graph (kickoff → parallel research → evaluate →
/// loop/write) with the given research nodes and policy. The writer runs
/// against a mock LLM that replies "memo".
pub fn research_graph(
    web: Arc<dyn Node<AnalysisState>>,
    financial: Arc<dyn Node<AnalysisState>>,
    policy: SufficiencyPolicy,
) -> CompiledWorkflow<AnalysisState> {
    let mut graph = WorkflowGraph::<AnalysisState>::new();
    graph.add_node(KICKOFF, Arc::new(KickoffNode)).unwrap();
    graph.add_node(WEB_RESEARCH, web).unwrap();
    graph.add_node(FINANCIAL_ANALYSIS, financial).unwrap();
    graph
        .add_node(EVALUATE, Arc::new(EvaluateNode::new(policy)))
        .unwrap();
    graph
        .add_node(
            WRITE,
            Arc::new(WriterNode::new(Arc::new(MockLlm::with_reply("memo")))),
        )
        .unwrap();

    graph.add_edge(START, KICKOFF).unwrap();
    graph.add_edge(KICKOFF, WEB_RESEARCH).unwrap();
    graph.add_edge(KICKOFF, FINANCIAL_ANALYSIS).unwrap();
    graph.add_edge(WEB_RESEARCH, EVALUATE).unwrap();
    graph.add_edge(FINANCIAL_ANALYSIS, EVALUATE).unwrap();
    graph
        .add_conditional_edge(
            EVALUATE,
            researchgraph::route_after_evaluation(),
            [KICKOFF, WRITE],
        )
        .unwrap();
    graph.add_edge(WRITE, END).unwrap();

    graph.compile().expect("research graph compiles")
}
