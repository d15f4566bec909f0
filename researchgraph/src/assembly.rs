//! Research workflow assembly.
//!
//! Wires the concrete nodes into the report pipeline:
//!
//! ```text
//!        START
//!          │
//!       kickoff ◄────────────┐
//!        ┌─┴─┐               │
//!        ▼   ▼               │
//!  web_research  financial_analysis   (parallel)
//!        └─┬─┘               │
//!          ▼                 │
//!       evaluate ── research ┘
//!          │
//!        write
//!          │
//!         END
//! ```
//!
//! Both research branches write only append-policy fields, so they can run
//! concurrently without merge conflicts; evaluation waits for both (fan-in).

use std::sync::Arc;

use crate::gate::SufficiencyPolicy;
use crate::graph::{CompiledWorkflow, GraphError, Router, WorkflowGraph, END, START};
use crate::nodes::{EvaluateNode, FinancialAnalystNode, KickoffNode, WebResearchNode, WriterNode};
use crate::service::{LlmClient, RetrievalClient, SearchClient};
use crate::state::AnalysisState;

pub const KICKOFF: &str = "kickoff";
pub const WEB_RESEARCH: &str = "web_research";
pub const FINANCIAL_ANALYSIS: &str = "financial_analysis";
pub const EVALUATE: &str = "evaluate";
pub const WRITE: &str = "write";

/// External-service backends the research nodes run against.
pub struct ResearchServices {
    pub llm: Arc<dyn LlmClient>,
    pub search: Arc<dyn SearchClient>,
    pub retrieval: Arc<dyn RetrievalClient>,
}

/// Router leaving evaluation: loop back for more research or proceed to the
/// final write, based on the sufficiency flag the evaluate node just merged.
pub fn route_after_evaluation() -> Router<AnalysisState> {
    Arc::new(|state: &AnalysisState| {
        if state.sufficiency {
            WRITE.to_string()
        } else {
            KICKOFF.to_string()
        }
    })
}

/// Builds and compiles the research workflow.
pub fn build_research_workflow(
    services: ResearchServices,
    policy: SufficiencyPolicy,
) -> Result<CompiledWorkflow<AnalysisState>, GraphError> {
    let mut graph = WorkflowGraph::new();
    graph.add_node(KICKOFF, Arc::new(KickoffNode))?;
    graph.add_node(
        WEB_RESEARCH,
        Arc::new(WebResearchNode::new(services.search, services.llm.clone())),
    )?;
    graph.add_node(
        FINANCIAL_ANALYSIS,
        Arc::new(FinancialAnalystNode::new(
            services.retrieval,
            services.llm.clone(),
        )),
    )?;
    graph.add_node(EVALUATE, Arc::new(EvaluateNode::new(policy)))?;
    graph.add_node(WRITE, Arc::new(WriterNode::new(services.llm)))?;

    graph.add_edge(START, KICKOFF)?;
    graph.add_edge(KICKOFF, WEB_RESEARCH)?;
    graph.add_edge(KICKOFF, FINANCIAL_ANALYSIS)?;
    graph.add_edge(WEB_RESEARCH, EVALUATE)?;
    graph.add_edge(FINANCIAL_ANALYSIS, EVALUATE)?;
    graph.add_conditional_edge(EVALUATE, route_after_evaluation(), [KICKOFF, WRITE])?;
    graph.add_edge(WRITE, END)?;

    graph.compile()
}
