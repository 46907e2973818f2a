use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::EngineError;

/// One completed analysis, as remembered for status reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub measurement_id: Uuid,
    pub patient_id: Uuid,
    pub alert_id: Option<Uuid>,
    pub confidence: f64,
    pub analyzed_at: NaiveDateTime,
}

/// Aggregates over the log, consumed by the status report.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTotals {
    pub analyses: usize,
    pub alerts: usize,
    pub mean_confidence: f64,
}

/// Append-only in-memory record of analyses, backed by RwLock so the
/// engine stays shareable across threads. Used only for status reporting;
/// never consulted by decision logic. Owned by whoever owns the engine,
/// so independent engine instances keep independent histories.
pub struct AnalysisLog {
    entries: std::sync::RwLock<Vec<AnalysisRecord>>,
}

impl AnalysisLog {
    pub fn new() -> Self {
        Self {
            entries: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Append one record.
    pub fn record(&self, record: AnalysisRecord) -> Result<(), EngineError> {
        let mut entries = self.entries.write().map_err(|_| EngineError::LockFailed)?;
        entries.push(record);
        Ok(())
    }

    /// Number of analyses recorded so far.
    pub fn len(&self) -> Result<usize, EngineError> {
        let entries = self.entries.read().map_err(|_| EngineError::LockFailed)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, EngineError> {
        Ok(self.len()? == 0)
    }

    /// Totals for the status report. An empty log reports zero confidence.
    pub fn totals(&self) -> Result<LogTotals, EngineError> {
        let entries = self.entries.read().map_err(|_| EngineError::LockFailed)?;

        if entries.is_empty() {
            return Ok(LogTotals::default());
        }

        let alerts = entries.iter().filter(|r| r.alert_id.is_some()).count();
        let confidence_sum: f64 = entries.iter().map(|r| r.confidence).sum();

        Ok(LogTotals {
            analyses: entries.len(),
            alerts,
            mean_confidence: confidence_sum / entries.len() as f64,
        })
    }
}

impl Default for AnalysisLog {
    fn default() -> Self {
        Self::new()
    }
}
