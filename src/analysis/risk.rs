use crate::models::VitalType;

use super::reference::VitalReference;
use super::types::RiskLevel;

/// Contextual risk contributed by the patient's diagnosis text.
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub observation: String,
    pub reasoning: String,
}

/// Cross-reference the diagnosis free text against the risk rules for this
/// vital type. Matching is case-insensitive substring search; the number of
/// matched rules sets the level (0 low, 1 medium, more high) and the matched
/// phrases are joined into the observation.
pub fn assess_diagnosis_risk(
    vital_type: VitalType,
    diagnosis: &str,
    reference: &VitalReference,
) -> RiskAssessment {
    let diagnosis_lower = diagnosis.to_lowercase();

    let matched: Vec<&str> = reference
        .risk_rules_for(vital_type)
        .filter(|rule| {
            rule.keywords
                .iter()
                .any(|keyword| diagnosis_lower.contains(keyword.as_str()))
        })
        .map(|rule| rule.phrase.as_str())
        .collect();

    if matched.is_empty() {
        return RiskAssessment {
            level: RiskLevel::Low,
            observation: "No direct high-risk link between the diagnosis and this measurement"
                .into(),
            reasoning: "Standard interpretation criteria apply".into(),
        };
    }

    RiskAssessment {
        level: if matched.len() > 1 {
            RiskLevel::High
        } else {
            RiskLevel::Medium
        },
        observation: matched.join("; "),
        reasoning: "The patient's background raises the clinical significance of this reading"
            .into(),
    }
}
