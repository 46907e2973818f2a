//! The alert decision engine.
//!
//! A new measurement flows through three independent signals (threshold
//! classification, trend analysis, and diagnosis risk) which the decision
//! composer merges into zero-or-one alert, optionally with a step-by-step
//! thinking trace. Batch entry points deduplicate overlapping alerts per
//! patient.

pub mod classify;
pub mod decision;
pub mod dedup;
pub mod engine;
pub mod log;
pub mod messages;
pub mod reference;
pub mod risk;
pub mod sweep;
pub mod trend;
pub mod types;

pub use dedup::{dedup_by_category, dedup_by_title};
pub use engine::{CareEngine, EngineProfile};
pub use log::{AnalysisLog, AnalysisRecord};
pub use reference::VitalReference;
pub use sweep::{follow_up_reminder, sweep_all, sweep_measurement, trend_alert};
pub use types::{
    AnalysisOutcome, EngineError, RiskLevel, StatusReport, ThinkingStep, TrendDirection,
};
