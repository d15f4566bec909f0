//! End-to-end invoke scenarios for the research loop.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use researchgraph::{
    AnalysisState, MergeConflict, Node, RunConfig, RunError, ServiceError, StateDelta,
    SufficiencyPolicy, WorkflowGraph, END, FULL_DRAFT, START,
};

use crate::common::{research_graph, Category, EmptyStub, FailingStub, FindingStub};

fn web_stub(text: &'static str) -> Arc<FindingStub> {
    Arc::new(FindingStub::new("web_research", Category::Market, text))
}

fn financial_stub(text: &'static str) -> Arc<FindingStub> {
    Arc::new(FindingStub::new(
        "financial_analysis",
        Category::Financial,
        text,
    ))
}

/// **Scenario**: Round 1 both research nodes return one finding each; the gate
/// observes both categories plus one completed pass and routes to write.
#[tokio::test]
async fn one_pass_sufficiency() {
    let workflow = research_graph(
        web_stub("ev demand strong"),
        financial_stub("revenue grew 19%"),
        SufficiencyPolicy::default(),
    );
    let out = workflow
        .invoke(
            AnalysisState::for_subject("Tesla", "TSLA"),
            RunConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(out.market_findings, vec!["ev demand strong"]);
    assert_eq!(out.financial_findings, vec!["revenue grew 19%"]);
    assert_eq!(out.iteration_count, 1);
    assert!(out.sufficiency);
    assert_eq!(out.output_sections[FULL_DRAFT], "memo");
}

/// **Scenario**: Both research nodes always return empty deltas; the run still
/// terminates at the ceiling-th pass with empty findings and a forced
/// sufficiency verdict.
#[tokio::test]
async fn empty_deltas_terminate_at_ceiling() {
    let workflow = research_graph(
        Arc::new(EmptyStub { id: "web_research" }),
        Arc::new(EmptyStub { id: "financial_analysis" }),
        SufficiencyPolicy::with_ceiling(3),
    );
    let out = workflow
        .invoke(
            AnalysisState::for_subject("Tesla", "TSLA"),
            RunConfig::with_ceiling(3),
        )
        .await
        .unwrap();

    assert_eq!(out.iteration_count, 3);
    assert!(out.financial_findings.is_empty());
    assert!(out.market_findings.is_empty());
    assert!(out.sufficiency, "sufficiency is forced at the ceiling");
    assert!(out.output_sections.contains_key(FULL_DRAFT));
}

/// **Scenario**: iteration_count never exceeds the configured ceiling, for a
/// range of ceilings.
#[tokio::test]
async fn iteration_count_never_exceeds_ceiling() {
    for ceiling in [1u32, 2, 4] {
        let workflow = research_graph(
            Arc::new(EmptyStub { id: "web_research" }),
            Arc::new(EmptyStub { id: "financial_analysis" }),
            SufficiencyPolicy::with_ceiling(ceiling),
        );
        let out = workflow
            .invoke(
                AnalysisState::for_subject("Tesla", "TSLA"),
                RunConfig::with_ceiling(ceiling),
            )
            .await
            .unwrap();
        assert!(
            out.iteration_count <= ceiling,
            "ceiling {} exceeded: {}",
            ceiling,
            out.iteration_count
        );
    }
}

/// **Scenario**: One research branch keeps failing; the run degrades instead
/// of aborting, and the final state differs from the healthy run only in the
/// failing branch's missing contribution.
#[tokio::test]
async fn degraded_branch_does_not_abort() {
    let workflow = research_graph(
        web_stub("ev demand strong"),
        Arc::new(FailingStub { id: "financial_analysis" }),
        SufficiencyPolicy::with_ceiling(3),
    );
    let out = workflow
        .invoke(
            AnalysisState::for_subject("Tesla", "TSLA"),
            RunConfig::with_ceiling(3),
        )
        .await
        .unwrap();

    assert!(out.financial_findings.is_empty());
    assert_eq!(
        out.market_findings.len(),
        3,
        "healthy branch contributed every pass until the forced stop"
    );
    assert!(out.sufficiency);
    assert!(out.output_sections.contains_key(FULL_DRAFT));
}

/// **Scenario**: With allow_partial, a degraded branch no longer blocks the
/// gate: one pass with only market findings proceeds to write.
#[tokio::test]
async fn degraded_branch_with_partial_policy_finishes_in_one_pass() {
    let policy = SufficiencyPolicy {
        allow_partial: true,
        ..Default::default()
    };
    let workflow = research_graph(
        web_stub("ev demand strong"),
        Arc::new(FailingStub { id: "financial_analysis" }),
        policy,
    );
    let out = workflow
        .invoke(
            AnalysisState::for_subject("Tesla", "TSLA"),
            RunConfig::default(),
        )
        .await
        .unwrap();
    assert_eq!(out.iteration_count, 1);
    assert_eq!(out.market_findings.len(), 1);
}

/// **Scenario**: Identical mocked outputs with opposite completion-time jitter
/// produce byte-identical final states; merge order follows registration, not
/// completion.
#[tokio::test]
async fn merge_order_is_deterministic_under_jitter() {
    let slow_web_fast_fin = research_graph(
        Arc::new(
            FindingStub::new("web_research", Category::Market, "m1")
                .delayed(Duration::from_millis(40)),
        ),
        Arc::new(
            FindingStub::new("financial_analysis", Category::Financial, "f1")
                .delayed(Duration::from_millis(1)),
        ),
        SufficiencyPolicy::default(),
    );
    let fast_web_slow_fin = research_graph(
        Arc::new(
            FindingStub::new("web_research", Category::Market, "m1")
                .delayed(Duration::from_millis(1)),
        ),
        Arc::new(
            FindingStub::new("financial_analysis", Category::Financial, "f1")
                .delayed(Duration::from_millis(40)),
        ),
        SufficiencyPolicy::default(),
    );

    let initial = AnalysisState::for_subject("Tesla", "TSLA");
    let a = slow_web_fast_fin
        .invoke(initial.clone(), RunConfig::default())
        .await
        .unwrap();
    let b = fast_web_slow_fin
        .invoke(initial.clone(), RunConfig::default())
        .await
        .unwrap();
    let a_again = slow_web_fast_fin
        .invoke(initial, RunConfig::default())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&a_again).unwrap()
    );
}

/// **Scenario**: Two concurrent nodes writing the same replace-policy field in
/// one step abort the run with MergeConflict.
#[tokio::test]
async fn concurrent_replace_writes_conflict() {
    struct SectionStub {
        id: &'static str,
        text: &'static str,
    }

    #[async_trait]
    impl Node<AnalysisState> for SectionStub {
        fn id(&self) -> &str {
            self.id
        }
        async fn run(&self, _snapshot: AnalysisState) -> Result<StateDelta, ServiceError> {
            Ok(StateDelta::default().with_section("summary", self.text))
        }
    }

    let mut graph = WorkflowGraph::<AnalysisState>::new();
    graph
        .add_node("split", Arc::new(EmptyStub { id: "split" }))
        .unwrap();
    graph
        .add_node("left", Arc::new(SectionStub { id: "left", text: "x" }))
        .unwrap();
    graph
        .add_node("right", Arc::new(SectionStub { id: "right", text: "y" }))
        .unwrap();
    graph
        .add_node("join", Arc::new(EmptyStub { id: "join" }))
        .unwrap();
    graph.add_edge(START, "split").unwrap();
    graph.add_edge("split", "left").unwrap();
    graph.add_edge("split", "right").unwrap();
    graph.add_edge("left", "join").unwrap();
    graph.add_edge("right", "join").unwrap();
    graph.add_edge("join", END).unwrap();

    let result = graph
        .compile()
        .unwrap()
        .invoke(AnalysisState::default(), RunConfig::default())
        .await;
    match result {
        Err(RunError::MergeConflict(MergeConflict { field, first, second })) => {
            assert_eq!(field, "output_sections[summary]");
            assert_eq!((first.as_str(), second.as_str()), ("left", "right"));
        }
        other => panic!("expected MergeConflict, got {:?}", other),
    }
}

/// **Scenario**: A router returning an id outside allowed_targets raises
/// RouterContract; the run fails instead of producing a final state.
#[tokio::test]
async fn rogue_router_raises_contract_error() {
    let mut graph = WorkflowGraph::<AnalysisState>::new();
    graph.add_node("a", Arc::new(EmptyStub { id: "a" })).unwrap();
    graph.add_node("b", Arc::new(EmptyStub { id: "b" })).unwrap();
    graph.add_node("c", Arc::new(EmptyStub { id: "c" })).unwrap();
    graph.add_edge(START, "a").unwrap();
    graph
        .add_conditional_edge("a", Arc::new(|_: &AnalysisState| "c".to_string()), ["b"])
        .unwrap();
    graph.add_edge("b", "c").unwrap();
    graph.add_edge("c", END).unwrap();

    let result = graph
        .compile()
        .unwrap()
        .invoke(AnalysisState::default(), RunConfig::default())
        .await;
    match result {
        Err(RunError::RouterContract { node, returned }) => {
            assert_eq!(node, "a");
            assert_eq!(returned, "c");
        }
        other => panic!("expected RouterContract, got {:?}", other),
    }
}
