//! Trend analysis over a patient's measurement history.
//!
//! Two related but deliberately distinct heuristics live here, one per
//! call path, and they must stay separate because their call sites rely
//! on different semantics:
//!
//! - [`assess_recent_trend`] (interactive single-measurement analysis)
//!   compares the current value against the mean of the most recent five
//!   same-type samples and classifies within a ±5% stability band.
//! - [`split_window_shift`] (batch sweep) splits the most recent ten
//!   samples into the newest three versus the remainder, compares the two
//!   sub-averages, and only reports a shift beyond 15%.

use crate::models::Measurement;

use super::types::TrendDirection;

/// Samples considered by the recent-vs-baseline heuristic.
const RECENT_SAMPLE_WINDOW: usize = 5;
/// Percentage band within which a value counts as stable.
const STABLE_BAND_PERCENT: f64 = 5.0;

/// Samples considered by the split-window heuristic.
const SWEEP_SAMPLE_WINDOW: usize = 10;
/// Size of the newest sub-window.
const SWEEP_RECENT_COUNT: usize = 3;
/// Minimum sub-average shift that counts as a trend.
const SHIFT_ALERT_PERCENT: f64 = 15.0;

/// Directional assessment of the current value against its recent baseline.
#[derive(Debug, Clone)]
pub struct TrendAssessment {
    pub direction: TrendDirection,
    pub observation: String,
    pub reasoning: String,
}

/// A sustained shift between the newest and older sample sub-averages.
#[derive(Debug, Clone, Copy)]
pub struct WindowShift {
    /// Signed percentage change of the recent sub-average over the older one.
    pub change_percent: f64,
}

impl WindowShift {
    pub fn rising(&self) -> bool {
        self.change_percent > 0.0
    }
}

/// Newest-first values of the same patient + type as `current`.
fn recent_same_type_values(current: &Measurement, history: &[Measurement], take: usize) -> Vec<f64> {
    let mut same_type: Vec<&Measurement> = history
        .iter()
        .filter(|m| m.vital_type == current.vital_type && m.patient_id == current.patient_id)
        .collect();
    same_type.sort_by(|a, b| b.measured_at.cmp(&a.measured_at));
    same_type.iter().take(take).map(|m| m.value).collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Classify the current value against the mean of the most recent samples.
///
/// Fewer than two usable samples is a defined base case (stable with an
/// "insufficient data" observation), not an error.
pub fn assess_recent_trend(current: &Measurement, history: &[Measurement]) -> TrendAssessment {
    let values = recent_same_type_values(current, history, RECENT_SAMPLE_WINDOW);

    if values.len() < 2 {
        return TrendAssessment {
            direction: TrendDirection::Stable,
            observation: "Not enough history for a trend assessment".into(),
            reasoning: "More readings are needed before a trend can be judged".into(),
        };
    }

    let baseline = mean(&values);
    let change = (current.value - baseline) / baseline * 100.0;

    if change.abs() < STABLE_BAND_PERCENT {
        TrendAssessment {
            direction: TrendDirection::Stable,
            observation: format!("Recent readings are steady, averaging about {:.1}", baseline),
            reasoning: "The change stays within normal fluctuation".into(),
        }
    } else if change > 0.0 {
        TrendAssessment {
            direction: TrendDirection::Up,
            observation: format!("Readings are rising, {:.1}% above the recent average", change),
            reasoning: "A sustained rise may signal a change in the patient's condition".into(),
        }
    } else {
        TrendAssessment {
            direction: TrendDirection::Down,
            observation: format!(
                "Readings are falling, {:.1}% below the recent average",
                change.abs()
            ),
            reasoning: "The cause of the decline needs assessment, and possibly intervention"
                .into(),
        }
    }
}

/// Compare the newest three samples against the older remainder of the
/// ten-sample window. Returns `None` when fewer than three samples exist
/// or the sub-averages differ by 15% or less.
pub fn split_window_shift(current: &Measurement, history: &[Measurement]) -> Option<WindowShift> {
    let values = recent_same_type_values(current, history, SWEEP_SAMPLE_WINDOW);

    if values.len() < SWEEP_RECENT_COUNT {
        return None;
    }

    let recent_avg = mean(&values[..SWEEP_RECENT_COUNT]);
    let older = &values[SWEEP_RECENT_COUNT..];
    // An empty older window leaves nothing to compare against.
    if older.is_empty() {
        return None;
    }
    let older_avg = mean(older);

    let change_percent = (recent_avg - older_avg) / older_avg * 100.0;

    if change_percent.abs() > SHIFT_ALERT_PERCENT {
        Some(WindowShift { change_percent })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    use crate::models::VitalType;

    use super::*;

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn make_measurement(
        patient_id: Uuid,
        vital_type: VitalType,
        value: f64,
        hours_ago: i64,
    ) -> Measurement {
        Measurement {
            id: Uuid::new_v4(),
            patient_id,
            vital_type,
            value,
            secondary_value: None,
            unit: vital_type.default_unit().to_string(),
            measured_at: base_time() - Duration::hours(hours_ago),
            recorded_by: "Nurse Lin".into(),
        }
    }

    fn history(patient_id: Uuid, values: &[f64]) -> Vec<Measurement> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| make_measurement(patient_id, VitalType::HeartRate, *v, (i + 1) as i64))
            .collect()
    }

    #[test]
    fn fewer_than_two_samples_is_stable() {
        let patient_id = Uuid::new_v4();
        let current = make_measurement(patient_id, VitalType::HeartRate, 80.0, 0);
        let assessment = assess_recent_trend(&current, &history(patient_id, &[78.0]));
        assert_eq!(assessment.direction, TrendDirection::Stable);
        assert!(assessment.observation.contains("Not enough history"));
    }

    #[test]
    fn identical_history_is_stable() {
        let patient_id = Uuid::new_v4();
        let current = make_measurement(patient_id, VitalType::HeartRate, 80.0, 0);
        let assessment =
            assess_recent_trend(&current, &history(patient_id, &[80.0, 80.0, 80.0, 80.0, 80.0]));
        assert_eq!(assessment.direction, TrendDirection::Stable);
    }

    #[test]
    fn rise_beyond_five_percent_is_up() {
        let patient_id = Uuid::new_v4();
        let current = make_measurement(patient_id, VitalType::HeartRate, 90.0, 0);
        let assessment =
            assess_recent_trend(&current, &history(patient_id, &[80.0, 80.0, 80.0]));
        assert_eq!(assessment.direction, TrendDirection::Up);
    }

    #[test]
    fn fall_beyond_five_percent_is_down() {
        let patient_id = Uuid::new_v4();
        let current = make_measurement(patient_id, VitalType::HeartRate, 70.0, 0);
        let assessment =
            assess_recent_trend(&current, &history(patient_id, &[80.0, 80.0, 80.0]));
        assert_eq!(assessment.direction, TrendDirection::Down);
    }

    #[test]
    fn baseline_uses_only_five_newest_samples() {
        let patient_id = Uuid::new_v4();
        // Five newest at 80, older outliers at 200 must not skew the baseline.
        let mut h = history(patient_id, &[80.0, 80.0, 80.0, 80.0, 80.0]);
        h.push(make_measurement(patient_id, VitalType::HeartRate, 200.0, 24));
        h.push(make_measurement(patient_id, VitalType::HeartRate, 200.0, 25));

        let current = make_measurement(patient_id, VitalType::HeartRate, 81.0, 0);
        let assessment = assess_recent_trend(&current, &h);
        assert_eq!(assessment.direction, TrendDirection::Stable);
    }

    #[test]
    fn other_patients_and_types_are_ignored() {
        let patient_id = Uuid::new_v4();
        let mut h = history(patient_id, &[80.0]);
        h.push(make_measurement(Uuid::new_v4(), VitalType::HeartRate, 150.0, 2));
        h.push(make_measurement(patient_id, VitalType::BloodSugar, 150.0, 2));

        let current = make_measurement(patient_id, VitalType::HeartRate, 80.0, 0);
        let assessment = assess_recent_trend(&current, &h);
        // Only one usable sample remains.
        assert!(assessment.observation.contains("Not enough history"));
    }

    #[test]
    fn split_window_needs_three_samples() {
        let patient_id = Uuid::new_v4();
        let current = make_measurement(patient_id, VitalType::HeartRate, 80.0, 0);
        assert!(split_window_shift(&current, &history(patient_id, &[80.0, 95.0])).is_none());
    }

    #[test]
    fn split_window_needs_an_older_window() {
        let patient_id = Uuid::new_v4();
        // Exactly three samples leave no older window to compare against.
        let h = history(patient_id, &[100.0, 100.0, 100.0]);
        let current = make_measurement(patient_id, VitalType::HeartRate, 100.0, 0);
        assert!(split_window_shift(&current, &h).is_none());
    }

    #[test]
    fn split_window_flags_large_shift() {
        let patient_id = Uuid::new_v4();
        // Newest three average 100, older three average 80: +25%.
        let h = history(patient_id, &[100.0, 100.0, 100.0, 80.0, 80.0, 80.0]);
        let current = make_measurement(patient_id, VitalType::HeartRate, 100.0, 0);

        let shift = split_window_shift(&current, &h).unwrap();
        assert!(shift.rising());
        assert!((shift.change_percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn split_window_ignores_small_shift() {
        let patient_id = Uuid::new_v4();
        // +12.5% stays under the 15% bar.
        let h = history(patient_id, &[90.0, 90.0, 90.0, 80.0, 80.0, 80.0]);
        let current = make_measurement(patient_id, VitalType::HeartRate, 90.0, 0);
        assert!(split_window_shift(&current, &h).is_none());
    }

    #[test]
    fn split_window_downward_shift() {
        let patient_id = Uuid::new_v4();
        let h = history(patient_id, &[60.0, 60.0, 60.0, 80.0, 80.0, 80.0]);
        let current = make_measurement(patient_id, VitalType::HeartRate, 60.0, 0);

        let shift = split_window_shift(&current, &h).unwrap();
        assert!(!shift.rising());
        assert!(shift.change_percent < -SHIFT_ALERT_PERCENT);
    }
}
