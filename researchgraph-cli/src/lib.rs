//! CLI for the researchgraph report workflow.
//!
//! Runs the assembled research workflow for a company/ticker against mock
//! service backends (real search/retrieval/LLM backends plug in through the
//! `researchgraph::service` traits) and prints the generated memo, streams
//! per-node progress, or dumps the final state as JSON.

use std::collections::HashSet;
use std::sync::Arc;

use clap::Parser;
use tokio_stream::StreamExt;

use researchgraph::{
    build_research_workflow, AnalysisState, MockLlm, MockRetrieval, MockSearch, ResearchServices,
    RunConfig, StreamEvent, StreamMode, SufficiencyPolicy, FULL_DRAFT,
};

/// Generate a research memo for a company.
#[derive(Debug, Parser)]
#[command(name = "researchgraph", version, about)]
pub struct Cli {
    /// Company name, e.g. "Tesla"
    pub company: String,
    /// Stock ticker, e.g. "TSLA"
    pub ticker: String,
    /// Maximum research passes before the run is forced to finish
    #[arg(long, default_value_t = 3)]
    pub max_iterations: u32,
    /// Accept a single populated findings category instead of both
    #[arg(long)]
    pub allow_partial: bool,
    /// Stream per-node progress instead of waiting for the final memo
    #[arg(long)]
    pub stream: bool,
    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

fn demo_services(company: &str) -> ResearchServices {
    ResearchServices {
        llm: Arc::new(MockLlm::with_reply(format!(
            "# Investment Memo: {company}\n\n\
             ## Executive Summary\n\nSynthesized from the research below.\n"
        ))),
        search: Arc::new(MockSearch::with_answer(format!(
            "{company} shows strong recent coverage across market and competitor news."
        ))),
        retrieval: Arc::new(MockRetrieval::with_passages([format!(
            "{company} reported year-over-year revenue growth in its latest filing."
        )])),
    }
}

/// Runs the workflow per the parsed arguments.
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let policy = SufficiencyPolicy {
        ceiling: cli.max_iterations,
        allow_partial: cli.allow_partial,
        ..Default::default()
    };
    let workflow = build_research_workflow(demo_services(&cli.company), policy)?;
    let initial = AnalysisState::for_subject(&cli.company, &cli.ticker);
    let config = RunConfig::with_ceiling(cli.max_iterations);

    let final_state = if cli.stream {
        let mut events = workflow.stream(
            initial,
            config,
            HashSet::from_iter([StreamMode::Updates, StreamMode::Values]),
        );
        let mut last = None;
        while let Some(event) = events.next().await {
            match event {
                StreamEvent::Updates { node_id, degraded, .. } => {
                    if degraded {
                        println!("[{node_id}] degraded (service failure, empty delta)");
                    } else {
                        println!("[{node_id}] completed");
                    }
                }
                StreamEvent::Values(state) => last = Some(state),
            }
        }
        last.ok_or("stream ended without a final state")?
    } else {
        workflow.invoke(initial, config).await?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&final_state)?);
        return Ok(());
    }

    if let Some(memo) = final_state.output_sections.get(FULL_DRAFT) {
        println!("{memo}");
    }
    println!("---");
    println!("Research passes: {}", final_state.iteration_count);
    println!(
        "Findings: {} financial, {} market",
        final_state.financial_findings.len(),
        final_state.market_findings.len()
    );
    Ok(())
}
