use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Alert, AlertPriority, Measurement, Patient};

use super::classify::classify;
use super::dedup::dedup_by_category;
use super::decision::decide;
use super::log::{AnalysisLog, AnalysisRecord};
use super::messages::MessageTemplates;
use super::reference::VitalReference;
use super::risk::assess_diagnosis_risk;
use super::trend::assess_recent_trend;
use super::types::{AnalysisOutcome, EngineError, StatusReport, ThinkingStep};

/// Batch analysis looks back this far from the supplied "now".
const RECENT_WINDOW_HOURS: i64 = 24;
/// Batch analysis caps the number of measurements per run.
const RECENT_ANALYSIS_LIMIT: usize = 20;

/// Presentable identity of the engine, surfaced in the introduction and
/// status report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineProfile {
    pub name: String,
    pub role: String,
    pub capabilities: Vec<String>,
}

impl Default for EngineProfile {
    fn default() -> Self {
        Self {
            name: "Carewatch".into(),
            role: "clinical vital-sign monitoring assistant".into(),
            capabilities: vec![
                "Real-time detection of abnormal vital signs".into(),
                "Trend analysis of health changes".into(),
                "Professional nursing suggestions".into(),
                "Priority assessment and triage".into(),
                "Follow-up reminder generation".into(),
            ],
        }
    }
}

/// The alert decision engine.
///
/// Stateless per call except for the append-only analysis log used by the
/// status report, so one instance can be shared across threads. Callers
/// serialize ingestion per patient: trend analysis reads the measurement
/// history a concurrent write for the same patient could skew.
pub struct CareEngine {
    profile: EngineProfile,
    reference: VitalReference,
    log: AnalysisLog,
}

impl CareEngine {
    pub fn new(reference: VitalReference) -> Self {
        Self::with_profile(EngineProfile::default(), reference)
    }

    pub fn with_profile(profile: EngineProfile, reference: VitalReference) -> Self {
        Self {
            profile,
            reference,
            log: AnalysisLog::new(),
        }
    }

    pub fn profile(&self) -> &EngineProfile {
        &self.profile
    }

    pub fn reference(&self) -> &VitalReference {
        &self.reference
    }

    /// Analyze one measurement with a step-by-step thinking trace.
    ///
    /// The trace records each sub-decision in strict order, numbered from
    /// one: receipt, patient context, range comparison, trend analysis,
    /// risk assessment, final decision.
    pub fn analyze(
        &self,
        measurement: &Measurement,
        patient: &Patient,
        history: &[Measurement],
    ) -> Result<AnalysisOutcome, EngineError> {
        let mut thinking: Vec<ThinkingStep> = Vec::new();
        let mut step = 0u32;
        let mut push = |thinking: &mut Vec<ThinkingStep>,
                        action: &str,
                        observation: String,
                        reasoning: String| {
            step += 1;
            thinking.push(ThinkingStep {
                step,
                action: action.into(),
                observation,
                reasoning,
            });
        };

        push(
            &mut thinking,
            "Receive measurement",
            format!(
                "Received {}'s {} reading: {}",
                patient.name,
                measurement.vital_type.display_name(),
                MessageTemplates::measurement_value(measurement)
            ),
            "Starting analysis of the newly uploaded measurement".into(),
        );

        push(
            &mut thinking,
            "Look up patient context",
            format!(
                "{}, {}-year-old {}, diagnosis: {}",
                patient.name,
                patient.age,
                patient.gender.as_str(),
                patient.diagnosis
            ),
            "The diagnosis background shapes how this reading should be interpreted".into(),
        );

        let classification = classify(measurement, &self.reference);
        let range_text = match self.reference.range_for(measurement.vital_type) {
            Some(range) => MessageTemplates::normal_range(measurement.vital_type, range),
            None => "no reference range on file".into(),
        };
        push(
            &mut thinking,
            "Compare against normal range",
            format!(
                "{} normal range: {}; the current reading is {} it",
                measurement.vital_type.display_name(),
                range_text,
                if classification.in_range {
                    "within"
                } else {
                    "outside"
                }
            ),
            if classification.in_range {
                "Within the normal range, but personal context and trend still matter".into()
            } else {
                "Outside the normal range; severity needs further assessment".into()
            },
        );

        let trend = assess_recent_trend(measurement, history);
        push(
            &mut thinking,
            "Analyze recent trend",
            trend.observation.clone(),
            trend.reasoning.clone(),
        );

        let risk = assess_diagnosis_risk(measurement.vital_type, &patient.diagnosis, &self.reference);
        push(
            &mut thinking,
            "Assess diagnosis-related risk",
            risk.observation.clone(),
            risk.reasoning.clone(),
        );

        let decision = decide(
            measurement,
            patient,
            &classification,
            &trend,
            &risk,
            &self.reference,
        );
        push(
            &mut thinking,
            "Draw conclusion",
            match &decision.alert {
                Some(_) => format!(
                    "Classified as a {} priority alert",
                    decision.priority.as_str()
                ),
                None => "Judged normal, no alert needed".into(),
            },
            decision.reasoning.clone(),
        );

        self.log.record(AnalysisRecord {
            measurement_id: measurement.id,
            patient_id: patient.id,
            alert_id: decision.alert.as_ref().map(|alert| alert.id),
            confidence: decision.confidence,
            analyzed_at: chrono::Local::now().naive_local(),
        })?;

        tracing::info!(
            measurement_id = %measurement.id,
            patient_id = %patient.id,
            priority = decision.priority.as_str(),
            alert = decision.alert.is_some(),
            "Measurement analysis complete"
        );

        Ok(AnalysisOutcome {
            alert: decision.alert,
            thinking,
            confidence: decision.confidence,
            reasoning: decision.reasoning,
        })
    }

    /// Analyze the measurements of the last 24 hours in one pass.
    ///
    /// Considers at most twenty recent measurements, runs the traced
    /// analysis for each against the patient's full history, and collapses
    /// the resulting alerts to one per (patient, category), most severe
    /// first.
    pub fn analyze_recent(
        &self,
        measurements: &[Measurement],
        patients: &[Patient],
        now: NaiveDateTime,
    ) -> Result<Vec<Alert>, EngineError> {
        let cutoff = now - Duration::hours(RECENT_WINDOW_HOURS);

        let recent: Vec<&Measurement> = measurements
            .iter()
            .filter(|m| m.measured_at > cutoff)
            .take(RECENT_ANALYSIS_LIMIT)
            .collect();

        let considered = recent.len();
        let mut alerts = Vec::new();
        for measurement in recent {
            let Some(patient) = patients.iter().find(|p| p.id == measurement.patient_id) else {
                continue;
            };

            let history: Vec<Measurement> = measurements
                .iter()
                .filter(|m| m.patient_id == patient.id)
                .cloned()
                .collect();

            let outcome = self.analyze(measurement, patient, &history)?;
            if let Some(alert) = outcome.alert {
                alerts.push(alert);
            }
        }

        let deduped = dedup_by_category(alerts);

        tracing::info!(
            analyzed = considered,
            alerts = deduped.len(),
            "Recent-batch analysis complete"
        );

        Ok(deduped)
    }

    /// Self-introduction for the dashboard's assistant panel.
    pub fn introduction(&self) -> String {
        let capabilities = self
            .profile
            .capabilities
            .iter()
            .enumerate()
            .map(|(i, capability)| format!("{}. {}", i + 1, capability))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Hello! I am {}, your {}.\n\nWhat I can do:\n{}\n\n\
             I keep watch over every patient's vital signs and will flag \
             anything that needs your attention right away.",
            self.profile.name, self.profile.role, capabilities
        )
    }

    /// Wrap an alert's suggestion in a courtesy message for display.
    /// Greeting choice is deterministic, rotating on the alert id.
    pub fn personalized_suggestion(&self, alert: &Alert, patient: &Patient) -> String {
        let greetings = [
            format!("Nurse, regarding {}'s condition: ", patient.name),
            format!("Please take note, {} ", patient.name),
            format!("{}'s latest readings show that ", patient.name),
        ];
        let greeting = &greetings[(alert.id.as_u128() % greetings.len() as u128) as usize];

        let body = match alert.priority {
            AlertPriority::Critical => format!(
                "the situation is urgent and needs handling now.\n\n\
                 Recommended immediate actions:\n{}",
                alert.suggestion
            ),
            AlertPriority::High => format!(
                "there is an abnormal finding that needs your attention soon.\n\n\
                 Recommended response:\n{}",
                alert.suggestion
            ),
            AlertPriority::Medium => format!(
                "some values need follow-up observation.\n\n\
                 Recommended follow-up:\n{}",
                alert.suggestion
            ),
            AlertPriority::Low => format!(
                "a routine follow-up is due.\n\n\
                 Recommendation:\n{}",
                alert.suggestion
            ),
        };

        format!(
            "{}{}\n\nI am happy to pull up more detail any time. — {}",
            greeting, body, self.profile.name
        )
    }

    /// Cumulative activity summary rendered from the analysis log.
    pub fn status_report(&self) -> Result<StatusReport, EngineError> {
        let totals = self.log.totals()?;
        Ok(StatusReport {
            agent_name: self.profile.name.clone(),
            analyses_performed: totals.analyses,
            alerts_generated: totals.alerts,
            mean_confidence: totals.mean_confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::models::{AlertCategory, Gender, VitalType};

    use super::*;

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn make_patient(diagnosis: &str) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            name: "Lin Shu-Fen".into(),
            age: 75,
            gender: Gender::Female,
            room_number: "301".into(),
            bed_number: "A".into(),
            diagnosis: diagnosis.into(),
            admitted_on: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
        }
    }

    fn make_measurement(
        patient: &Patient,
        vital_type: VitalType,
        value: f64,
        secondary: Option<f64>,
        hours_ago: i64,
    ) -> Measurement {
        Measurement {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            vital_type,
            value,
            secondary_value: secondary,
            unit: vital_type.default_unit().to_string(),
            measured_at: base_time() - Duration::hours(hours_ago),
            recorded_by: "Nurse Lin".into(),
        }
    }

    #[test]
    fn trace_steps_are_sequential_from_one() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("observation");
        let m = make_measurement(&patient, VitalType::HeartRate, 75.0, None, 0);

        let outcome = engine.analyze(&m, &patient, &[]).unwrap();
        assert_eq!(outcome.thinking.len(), 6);
        for (i, step) in outcome.thinking.iter().enumerate() {
            assert_eq!(step.step, (i + 1) as u32);
        }
        assert_eq!(outcome.thinking[0].action, "Receive measurement");
        assert_eq!(outcome.thinking[5].action, "Draw conclusion");
    }

    #[test]
    fn normal_measurement_yields_no_alert() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("recovering from knee surgery");
        let m = make_measurement(&patient, VitalType::HeartRate, 75.0, None, 0);

        let outcome = engine.analyze(&m, &patient, &[]).unwrap();
        assert!(outcome.alert.is_none());
        assert_eq!(outcome.reasoning, "Readings normal, no alert needed");
    }

    #[test]
    fn hypertensive_crisis_yields_critical_alert() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("observation");
        let m = make_measurement(&patient, VitalType::BloodPressure, 185.0, Some(95.0), 0);

        let outcome = engine.analyze(&m, &patient, &[]).unwrap();
        let alert = outcome.alert.unwrap();
        assert_eq!(alert.priority, AlertPriority::Critical);
        assert!((outcome.confidence - 0.95).abs() < 1e-9);
        assert!(outcome.reasoning.contains("hypertensive crisis"));
    }

    #[test]
    fn low_oxygen_with_copd_is_at_least_high() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("COPD, long-term oxygen therapy");
        let m = make_measurement(&patient, VitalType::OxygenSaturation, 93.0, None, 0);

        let outcome = engine.analyze(&m, &patient, &[]).unwrap();
        let alert = outcome.alert.unwrap();
        assert!(alert.priority >= AlertPriority::High);
        assert_eq!(alert.category, AlertCategory::Abnormal);
    }

    #[test]
    fn analyses_accumulate_in_the_status_report() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("observation");

        let normal = make_measurement(&patient, VitalType::HeartRate, 75.0, None, 0);
        let critical = make_measurement(&patient, VitalType::OxygenSaturation, 85.0, None, 0);
        engine.analyze(&normal, &patient, &[]).unwrap();
        engine.analyze(&critical, &patient, &[]).unwrap();

        let report = engine.status_report().unwrap();
        assert_eq!(report.analyses_performed, 2);
        assert_eq!(report.alerts_generated, 1);
        assert!(report.mean_confidence > 0.6);
        assert!(report.to_string().contains("alerts generated: 1"));
    }

    #[test]
    fn recent_batch_dedups_per_patient_and_category() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("observation");

        // Two critical abnormal readings for the same patient collapse to
        // a single alert for the (patient, category) key.
        let measurements = vec![
            make_measurement(&patient, VitalType::HeartRate, 155.0, None, 1),
            make_measurement(&patient, VitalType::OxygenSaturation, 85.0, None, 2),
        ];

        let alerts = engine
            .analyze_recent(&measurements, std::slice::from_ref(&patient), base_time())
            .unwrap();
        let abnormal: Vec<_> = alerts
            .iter()
            .filter(|a| a.category == AlertCategory::Abnormal)
            .collect();
        assert_eq!(abnormal.len(), 1);
        assert_eq!(abnormal[0].priority, AlertPriority::Critical);
    }

    #[test]
    fn recent_batch_ignores_stale_measurements() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("observation");

        let measurements = vec![make_measurement(
            &patient,
            VitalType::OxygenSaturation,
            85.0,
            None,
            48,
        )];

        let alerts = engine
            .analyze_recent(&measurements, std::slice::from_ref(&patient), base_time())
            .unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn recent_batch_skips_unknown_patients() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("observation");
        let stranger = make_patient("observation");

        let measurements = vec![make_measurement(
            &stranger,
            VitalType::OxygenSaturation,
            85.0,
            None,
            1,
        )];

        let alerts = engine
            .analyze_recent(&measurements, std::slice::from_ref(&patient), base_time())
            .unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn recent_batch_output_is_critical_first() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient_a = make_patient("observation");
        let patient_b = make_patient("observation");

        let measurements = vec![
            make_measurement(&patient_a, VitalType::HeartRate, 110.0, None, 1),
            make_measurement(&patient_b, VitalType::OxygenSaturation, 85.0, None, 1),
        ];

        let alerts = engine
            .analyze_recent(
                &measurements,
                &[patient_a.clone(), patient_b.clone()],
                base_time(),
            )
            .unwrap();
        assert!(alerts.len() >= 2);
        for pair in alerts.windows(2) {
            assert!(pair[0].priority.rank() <= pair[1].priority.rank());
        }
    }

    #[test]
    fn introduction_lists_capabilities() {
        let engine = CareEngine::new(VitalReference::builtin());
        let text = engine.introduction();
        assert!(text.contains("Carewatch"));
        assert!(text.contains("1. Real-time detection"));
    }

    #[test]
    fn personalized_suggestion_is_deterministic_per_alert() {
        let engine = CareEngine::new(VitalReference::builtin());
        let patient = make_patient("observation");
        let m = make_measurement(&patient, VitalType::OxygenSaturation, 85.0, None, 0);

        let alert = engine
            .analyze(&m, &patient, &[])
            .unwrap()
            .alert
            .unwrap();
        let first = engine.personalized_suggestion(&alert, &patient);
        let second = engine.personalized_suggestion(&alert, &patient);
        assert_eq!(first, second);
        assert!(first.contains(&alert.suggestion));
        assert!(first.contains("urgent"));
    }
}
