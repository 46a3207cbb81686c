//! # safehike-agent
//!
//! The SafeHike agent tree. [`PlannerAgent`] faces the user: it records the
//! mountain and hiking dates through function tools, then hands off to
//! [`HikingWorkflow`], an explicit task pipeline:
//!
//! ```text
//! planner
//!   └─ workflow (sequential)
//!        ├─ research team (parallel join)
//!        │    ├─ weather agent  → weather_report
//!        │    ├─ news agent     → news_report
//!        │    └─ links agent    → info_links
//!        ├─ trail agent         → trail_report
//!        └─ aggregator agent    → hiking_report
//! ```
//!
//! Each node reads a snapshot of the typed session state and commits its
//! output as a typed delta; the composition rules in [`workflow`] guarantee
//! the parallel members have all committed before the trail agent starts.

pub mod aggregator;
pub mod instructions;
pub mod planner;
pub mod research;
pub mod tools;
pub mod workflow;

pub use aggregator::AggregatorAgent;
pub use planner::{PlannerAgent, START_RESEARCH_TOOL};
pub use research::ResearchAgent;
pub use tools::{GetCurrentDateTool, SetHikingDatesTool, SetMountainTool, current_date_string};
pub use workflow::{HikingWorkflow, ResearchTeam};

use safehike_core::Llm;
use std::sync::Arc;

/// Wire up the full SafeHike agent tree on one model handle.
pub fn build_planner(model: Arc<dyn Llm>) -> PlannerAgent {
    PlannerAgent::new(model.clone(), Arc::new(HikingWorkflow::new(model)))
}
