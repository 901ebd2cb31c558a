//! Dashboard engine: data-source client and effect execution.
mod client;
mod engine;
mod types;

pub use client::{AnalysisApi, ApiSettings, HttpAnalysisApi};
pub use engine::EngineHandle;
pub use types::{ApiError, EngineEvent};
