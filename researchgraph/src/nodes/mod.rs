//! Concrete workflow nodes for the research-report pipeline.
//!
//! Each node implements `Node<AnalysisState>`: snapshot in, delta out. The
//! external services they call are behind the capability traits in
//! `crate::service`.

mod analyst;
mod evaluate;
mod kickoff;
mod research;
mod writer;

pub use analyst::FinancialAnalystNode;
pub use evaluate::EvaluateNode;
pub use kickoff::KickoffNode;
pub use research::WebResearchNode;
pub use writer::{WriterNode, FULL_DRAFT};
