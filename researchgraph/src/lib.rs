//! # researchgraph
//!
//! A workflow engine for iterative research-report generation, built around a
//! **snapshot-in, delta-out** state graph: one shared state type flows through
//! nodes, each node returns a partial update, and a frontier scheduler merges
//! updates atomically once per step.
//!
//! ## Design Principles
//!
//! - **Single state type, declared merge policies**: the state owns its merge
//!   semantics per field (replace / append / key-wise replace / summed
//!   counter); nodes never mutate shared state.
//! - **One merge per step**: frontier nodes run concurrently on cloned
//!   snapshots, a barrier collects every delta, and one atomic merge applies
//!   them in node-registration order. Output is reproducible regardless of
//!   completion order.
//! - **Structurally guaranteed termination**: the scheduler enforces the
//!   iteration ceiling itself; no node behavior can keep a run alive past it.
//! - **Graceful degradation**: a node's service failure contributes an empty
//!   delta and is surfaced in step events; only control-flow contract
//!   violations abort a run.
//!
//! ## Main Modules
//!
//! - [`graph`]: `WorkflowGraph`, `CompiledWorkflow`, `Node`, `Router` — build
//!   and run state graphs with fan-out/fan-in and conditional edges.
//! - [`state`]: `AnalysisState` / `StateDelta` and the `WorkflowState` trait.
//! - [`gate`]: the pure sufficiency decision consulted by the research loop.
//! - [`nodes`]: the concrete research, evaluation, and writer nodes.
//! - [`service`]: capability traits for search, retrieval, and LLM backends,
//!   plus mocks.
//! - [`assembly`]: wiring of the full research pipeline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use researchgraph::{
//!     build_research_workflow, AnalysisState, MockLlm, MockRetrieval, MockSearch,
//!     ResearchServices, RunConfig, SufficiencyPolicy,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let services = ResearchServices {
//!     llm: Arc::new(MockLlm::with_reply("memo text")),
//!     search: Arc::new(MockSearch::with_answer("market coverage")),
//!     retrieval: Arc::new(MockRetrieval::with_passages(["filing excerpt"])),
//! };
//! let workflow =
//!     build_research_workflow(services, SufficiencyPolicy::default()).unwrap();
//! let report = workflow
//!     .invoke(AnalysisState::for_subject("Tesla", "TSLA"), RunConfig::default())
//!     .await
//!     .unwrap();
//! println!("{}", report.output_sections["full_draft"]);
//! # }
//! ```

pub mod assembly;
pub mod error;
pub mod gate;
pub mod graph;
pub mod nodes;
pub mod service;
pub mod state;
pub mod stream;

pub use assembly::{
    build_research_workflow, route_after_evaluation, ResearchServices, EVALUATE,
    FINANCIAL_ANALYSIS, KICKOFF, WEB_RESEARCH, WRITE,
};
pub use error::{RunError, ServiceError};
pub use gate::{assess, SufficiencyPolicy, Verdict};
pub use graph::{
    CancelToken, CompiledWorkflow, GraphError, Node, Router, RunConfig, WorkflowGraph, END, START,
};
pub use nodes::{
    EvaluateNode, FinancialAnalystNode, KickoffNode, WebResearchNode, WriterNode, FULL_DRAFT,
};
pub use service::{
    LlmClient, MockLlm, MockRetrieval, MockSearch, RetrievalClient, SearchClient, SearchHit,
    SearchResponse,
};
pub use state::{AnalysisState, MergeConflict, StateDelta, Subject, WorkflowState};
pub use stream::{StreamEvent, StreamMode};
