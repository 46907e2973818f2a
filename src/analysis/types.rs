use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::enums::InvalidEnum;
use crate::models::Alert;

// ---------------------------------------------------------------------------
// TrendDirection & RiskLevel
// ---------------------------------------------------------------------------

/// Directional classification of a current value against its recent baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

/// Contextual risk weight contributed by the patient's diagnosis text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// ThinkingStep & AnalysisOutcome
// ---------------------------------------------------------------------------

/// One entry in the audit trail of how a decision was reached.
/// Purely explanatory; never consumed for control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThinkingStep {
    pub step: u32,
    pub action: String,
    pub observation: String,
    pub reasoning: String,
}

/// Result of one traced analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub alert: Option<Alert>,
    pub thinking: Vec<ThinkingStep>,
    pub confidence: f64,
    pub reasoning: String,
}

// ---------------------------------------------------------------------------
// StatusReport
// ---------------------------------------------------------------------------

/// Cumulative engine activity summary, rendered from the analysis log.
/// Purely observational; never consulted by decision logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub agent_name: String,
    pub analyses_performed: usize,
    pub alerts_generated: usize,
    pub mean_confidence: f64,
}

impl std::fmt::Display for StatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} status report", self.agent_name)?;
        writeln!(f, "  measurements analyzed: {}", self.analyses_performed)?;
        writeln!(f, "  alerts generated: {}", self.alerts_generated)?;
        write!(f, "  mean confidence: {:.1}%", self.mean_confidence * 100.0)
    }
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    InvalidEnum(#[from] InvalidEnum),

    #[error("Reference data load failed ({0}): {1}")]
    ReferenceDataLoad(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    ReferenceDataParse(String, String),

    #[error("Internal lock failed")]
    LockFailed,
}
