use uuid::Uuid;

use crate::models::{Alert, AlertCategory, AlertPriority, AlertStatus, Measurement, Patient};

use super::classify::Classification;
use super::messages::MessageTemplates;
use super::reference::VitalReference;
use super::risk::RiskAssessment;
use super::trend::TrendAssessment;
use super::types::{RiskLevel, TrendDirection};

/// Severity forced by a critical-value finding.
const CRITICAL_SEVERITY: u8 = 5;

/// Final decision for one measurement.
#[derive(Debug, Clone)]
pub struct Decision {
    pub alert: Option<Alert>,
    pub priority: AlertPriority,
    pub confidence: f64,
    pub reasoning: String,
}

/// Combine the classifier, trend, and risk signals into a severity score,
/// map it to a priority, and synthesize the alert record.
///
/// Severity accumulates from zero: +2 out of range, +2 high diagnosis risk
/// (+1 medium), +1 non-stable trend. A critical finding overrides the sum
/// entirely, forcing maximum severity and replacing the reasoning with the
/// rule's reason. A severity of zero is the only no-alert outcome.
pub fn decide(
    measurement: &Measurement,
    patient: &Patient,
    classification: &Classification,
    trend: &TrendAssessment,
    risk: &RiskAssessment,
    reference: &VitalReference,
) -> Decision {
    let mut severity: u8 = 0;
    let mut reasoning = String::new();

    if !classification.in_range {
        severity += 2;
        reasoning.push_str("Value outside the normal range; ");
    }

    match risk.level {
        RiskLevel::High => {
            severity += 2;
            reasoning.push_str("Patient diagnosis raises the risk; ");
        }
        RiskLevel::Medium => severity += 1,
        RiskLevel::Low => {}
    }

    if trend.direction != TrendDirection::Stable {
        severity += 1;
        let direction = match trend.direction {
            TrendDirection::Up => "rising",
            _ => "falling",
        };
        reasoning.push_str(&format!("Readings show a {} trend; ", direction));
    }

    if let Some(finding) = &classification.critical {
        severity = CRITICAL_SEVERITY;
        reasoning = finding.reason.clone();
    }

    let confidence = confidence_for(severity);

    let Some(priority) = priority_for(severity) else {
        return Decision {
            alert: None,
            priority: AlertPriority::Low,
            confidence,
            reasoning: "Readings normal, no alert needed".into(),
        };
    };

    let category = if severity >= 3 {
        AlertCategory::Abnormal
    } else {
        AlertCategory::Trend
    };

    let alert = Alert {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        measurement_id: Some(measurement.id),
        category,
        priority,
        title: MessageTemplates::alert_title(measurement.vital_type, patient, priority),
        message: MessageTemplates::alert_message(measurement, patient, &reasoning),
        suggestion: MessageTemplates::suggestion_checklist(
            measurement.vital_type,
            priority,
            reference,
        ),
        status: AlertStatus::Pending,
        created_at: chrono::Local::now().naive_local(),
        confirmed_at: None,
        confirmed_by: None,
    };

    Decision {
        alert: Some(alert),
        priority,
        confidence,
        reasoning,
    }
}

/// Severity-to-priority mapping. Zero severity produces no alert.
fn priority_for(severity: u8) -> Option<AlertPriority> {
    match severity {
        0 => None,
        1 => Some(AlertPriority::Low),
        2 => Some(AlertPriority::Medium),
        3 => Some(AlertPriority::High),
        _ => Some(AlertPriority::Critical),
    }
}

/// Confidence grows with severity and is capped at 0.95.
fn confidence_for(severity: u8) -> f64 {
    (0.6 + f64::from(severity) * 0.1).min(0.95)
}
