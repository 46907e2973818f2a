use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::VitalType;

use super::types::EngineError;

/// Normal reference range for one vital type. Blood pressure carries a
/// secondary (diastolic) range; every other type uses only min/max.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
    pub secondary_min: Option<f64>,
    pub secondary_max: Option<f64>,
}

/// Which measurement value a critical rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueField {
    Primary,
    Secondary,
}

/// Danger threshold. Temperature uses an inclusive upper bound; all other
/// rules are strict comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalBound {
    Above(f64),
    AtOrAbove(f64),
    Below(f64),
}

impl CriticalBound {
    pub fn crossed(&self, value: f64) -> bool {
        match *self {
            CriticalBound::Above(limit) => value > limit,
            CriticalBound::AtOrAbove(limit) => value >= limit,
            CriticalBound::Below(limit) => value < limit,
        }
    }
}

/// A single critical-value rule. When crossed, the rule's reason becomes
/// the alert's displayed reasoning and severity is forced to maximum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalRule {
    pub field: ValueField,
    pub bound: CriticalBound,
    pub reason: String,
}

/// Diagnosis keyword rule: if any keyword appears in the patient's
/// diagnosis text (case-insensitive), the phrase joins the risk observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRule {
    pub vital_type: VitalType,
    pub keywords: Vec<String>,
    pub phrase: String,
}

/// Loaded reference tables for the decision engine: normal ranges,
/// critical-value rules, diagnosis risk rules, and per-type suggestion
/// checklists. Static at runtime; kept as explicit data so the classifier
/// stays auditable and testable in isolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalReference {
    pub normal_ranges: HashMap<VitalType, NormalRange>,
    pub critical_rules: HashMap<VitalType, Vec<CriticalRule>>,
    pub risk_rules: Vec<RiskRule>,
    pub suggestions: HashMap<VitalType, Vec<String>>,
}

impl VitalReference {
    /// Load reference tables from a JSON file (see `config::reference_path`).
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ReferenceDataLoad(path.display().to_string(), e.to_string())
        })?;
        serde_json::from_str(&json).map_err(|e| {
            EngineError::ReferenceDataParse(path.display().to_string(), e.to_string())
        })
    }

    /// Bundled reference tables (no file I/O).
    pub fn builtin() -> Self {
        let mut normal_ranges = HashMap::new();
        normal_ranges.insert(
            VitalType::BloodPressure,
            NormalRange {
                min: 90.0,
                max: 140.0,
                secondary_min: Some(60.0),
                secondary_max: Some(90.0),
            },
        );
        normal_ranges.insert(
            VitalType::BloodSugar,
            NormalRange {
                min: 70.0,
                max: 140.0,
                secondary_min: None,
                secondary_max: None,
            },
        );
        normal_ranges.insert(
            VitalType::HeartRate,
            NormalRange {
                min: 60.0,
                max: 100.0,
                secondary_min: None,
                secondary_max: None,
            },
        );
        normal_ranges.insert(
            VitalType::Temperature,
            NormalRange {
                min: 36.0,
                max: 37.5,
                secondary_min: None,
                secondary_max: None,
            },
        );
        normal_ranges.insert(
            VitalType::OxygenSaturation,
            NormalRange {
                min: 95.0,
                max: 100.0,
                secondary_min: None,
                secondary_max: None,
            },
        );
        normal_ranges.insert(
            VitalType::Weight,
            NormalRange {
                min: 40.0,
                max: 100.0,
                secondary_min: None,
                secondary_max: None,
            },
        );

        let mut critical_rules = HashMap::new();
        critical_rules.insert(
            VitalType::BloodPressure,
            vec![
                CriticalRule {
                    field: ValueField::Primary,
                    bound: CriticalBound::Above(180.0),
                    reason: "Blood pressure at hypertensive crisis level (>180/120 mmHg)"
                        .into(),
                },
                CriticalRule {
                    field: ValueField::Secondary,
                    bound: CriticalBound::Above(120.0),
                    reason: "Blood pressure at hypertensive crisis level (>180/120 mmHg)"
                        .into(),
                },
                CriticalRule {
                    field: ValueField::Primary,
                    bound: CriticalBound::Below(80.0),
                    reason: "Systolic pressure below 80 mmHg, risk of shock".into(),
                },
            ],
        );
        critical_rules.insert(
            VitalType::BloodSugar,
            vec![
                CriticalRule {
                    field: ValueField::Primary,
                    bound: CriticalBound::Above(400.0),
                    reason: "Blood sugar severely elevated (>400 mg/dL), risk of ketoacidosis"
                        .into(),
                },
                CriticalRule {
                    field: ValueField::Primary,
                    bound: CriticalBound::Below(50.0),
                    reason: "Severe hypoglycemia (<50 mg/dL), risk of loss of consciousness"
                        .into(),
                },
            ],
        );
        critical_rules.insert(
            VitalType::HeartRate,
            vec![
                CriticalRule {
                    field: ValueField::Primary,
                    bound: CriticalBound::Above(150.0),
                    reason: "Severe tachycardia (>150 bpm)".into(),
                },
                CriticalRule {
                    field: ValueField::Primary,
                    bound: CriticalBound::Below(40.0),
                    reason: "Severe bradycardia (<40 bpm)".into(),
                },
            ],
        );
        critical_rules.insert(
            VitalType::OxygenSaturation,
            vec![CriticalRule {
                field: ValueField::Primary,
                bound: CriticalBound::Below(88.0),
                reason: "Oxygen saturation severely low (<88%), risk of respiratory failure"
                    .into(),
            }],
        );
        critical_rules.insert(
            VitalType::Temperature,
            vec![
                CriticalRule {
                    field: ValueField::Primary,
                    bound: CriticalBound::AtOrAbove(40.0),
                    reason: "High fever (>=40°C), aggressive cooling needed".into(),
                },
                CriticalRule {
                    field: ValueField::Primary,
                    bound: CriticalBound::Below(35.0),
                    reason: "Body temperature below 35°C, risk of hypothermia".into(),
                },
            ],
        );
        // Weight has no critical-value rules.

        let risk_rules = vec![
            RiskRule {
                vital_type: VitalType::BloodPressure,
                keywords: vec!["hypertension".into()],
                phrase: "History of hypertension; blood pressure changes need close attention"
                    .into(),
            },
            RiskRule {
                vital_type: VitalType::BloodPressure,
                keywords: vec!["heart".into(), "cardiac".into()],
                phrase: "Cardiac condition on record; blood pressure control is especially important"
                    .into(),
            },
            RiskRule {
                vital_type: VitalType::BloodSugar,
                keywords: vec!["diabetes".into()],
                phrase: "Diabetic patient; blood sugar may fluctuate widely".into(),
            },
            RiskRule {
                vital_type: VitalType::HeartRate,
                keywords: vec!["arrhythmia".into()],
                phrase: "History of arrhythmia; heart rate changes need close monitoring".into(),
            },
            RiskRule {
                vital_type: VitalType::OxygenSaturation,
                keywords: vec!["pulmonary".into(), "copd".into()],
                phrase: "Respiratory disease on record; oxygen monitoring is essential".into(),
            },
            RiskRule {
                vital_type: VitalType::Temperature,
                keywords: vec!["pneumonia".into()],
                phrase: "Pneumonia on record; temperature reflects infection control".into(),
            },
        ];

        let mut suggestions = HashMap::new();
        suggestions.insert(
            VitalType::BloodPressure,
            vec![
                "Check use of antihypertensive or vasopressor medication".to_string(),
                "Assess for symptoms such as headache or dizziness".to_string(),
            ],
        );
        suggestions.insert(
            VitalType::BloodSugar,
            vec![
                "Check insulin or oral hypoglycemic use".to_string(),
                "Review recent food intake".to_string(),
            ],
        );
        suggestions.insert(
            VitalType::HeartRate,
            vec![
                "Assess for palpitations or chest tightness".to_string(),
                "Arrange an ECG if needed".to_string(),
            ],
        );
        suggestions.insert(
            VitalType::OxygenSaturation,
            vec![
                "Check that oxygen equipment is working".to_string(),
                "Assess breathing and auscultate the lungs".to_string(),
            ],
        );
        suggestions.insert(
            VitalType::Temperature,
            vec![
                "Give appropriate antipyretic care".to_string(),
                "Monitor for signs of infection".to_string(),
            ],
        );
        suggestions.insert(VitalType::Weight, vec![]);

        Self {
            normal_ranges,
            critical_rules,
            risk_rules,
            suggestions,
        }
    }

    /// Normal range for a vital type, if the table defines one.
    pub fn range_for(&self, vital_type: VitalType) -> Option<&NormalRange> {
        self.normal_ranges.get(&vital_type)
    }

    /// Critical-value rules for a vital type (empty slice when none exist).
    pub fn critical_rules_for(&self, vital_type: VitalType) -> &[CriticalRule] {
        self.critical_rules
            .get(&vital_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Risk rules applicable to a vital type.
    pub fn risk_rules_for(&self, vital_type: VitalType) -> impl Iterator<Item = &RiskRule> {
        self.risk_rules
            .iter()
            .filter(move |rule| rule.vital_type == vital_type)
    }

    /// Suggestion checklist items for a vital type.
    pub fn suggestions_for(&self, vital_type: VitalType) -> &[String] {
        self.suggestions
            .get(&vital_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
