//! Carewatch: the alert decision engine behind a clinical vital-sign
//! monitoring dashboard.
//!
//! The engine ingests physiological measurements, judges whether each one
//! is clinically noteworthy, assigns a priority, produces a human-readable
//! alert with suggested actions, and deduplicates overlapping alerts per
//! patient. It is a pure in-process computation library: patient and
//! measurement storage, presentation, and follow-up task tracking live in
//! the surrounding application.

pub mod analysis;
pub mod config;
pub mod models;

pub use analysis::{
    AnalysisOutcome, CareEngine, EngineError, StatusReport, ThinkingStep, VitalReference,
};
pub use models::{Alert, AlertCategory, AlertPriority, AlertStatus, Measurement, Patient, VitalType};
