//! Monitor orchestration module.

mod orchestrator;
mod stats;

pub use orchestrator::{MonitorRuntime, Pipeline, PipelineConfig};
pub use stats::MonitorStats;
