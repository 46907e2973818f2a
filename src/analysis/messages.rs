use crate::models::{AlertPriority, Measurement, Patient, VitalType};

use super::reference::{NormalRange, VitalReference};

/// Immediate-action items prepended to critical suggestions.
const CRITICAL_ACTIONS: &[&str] = &[
    "Go to the bedside and assess the patient immediately",
    "Notify the physician on duty",
];
/// Immediate-action item prepended to high-priority suggestions.
const HIGH_ACTIONS: &[&str] = &["Check on the patient's current condition as soon as possible"];
/// Follow-through item appended for every priority above low.
const FOLLOW_THROUGH: &str = "Keep tracking and record any changes";

/// Format a numeric value without a trailing ".0" for whole numbers.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Template builder for alert text produced by the decision composer.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Display form of a measurement: "120/80 mmHg", "37.5 °C", "96 %".
    pub fn measurement_value(measurement: &Measurement) -> String {
        match measurement.vital_type {
            VitalType::BloodPressure => match measurement.secondary_value {
                Some(diastolic) => format!(
                    "{}/{} {}",
                    format_value(measurement.value),
                    format_value(diastolic),
                    measurement.unit
                ),
                None => format!("{} {}", format_value(measurement.value), measurement.unit),
            },
            VitalType::Temperature => format!("{:.1} {}", measurement.value, measurement.unit),
            _ => format!("{} {}", format_value(measurement.value), measurement.unit),
        }
    }

    /// Display form of a normal range: "90-140/60-90 mmHg" for blood
    /// pressure, "60-100" otherwise.
    pub fn normal_range(vital_type: VitalType, range: &NormalRange) -> String {
        if vital_type == VitalType::BloodPressure {
            if let (Some(secondary_min), Some(secondary_max)) =
                (range.secondary_min, range.secondary_max)
            {
                return format!(
                    "{}-{}/{}-{} mmHg",
                    format_value(range.min),
                    format_value(range.max),
                    format_value(secondary_min),
                    format_value(secondary_max)
                );
            }
        }
        format!("{}-{}", format_value(range.min), format_value(range.max))
    }

    /// Alert title with an urgency prefix for the top two tiers.
    pub fn alert_title(
        vital_type: VitalType,
        patient: &Patient,
        priority: AlertPriority,
    ) -> String {
        let prefix = match priority {
            AlertPriority::Critical => "URGENT: ",
            AlertPriority::High => "Attention: ",
            _ => "",
        };
        format!(
            "{}{} {} abnormal",
            prefix,
            patient.name,
            vital_type.display_name()
        )
    }

    /// Alert body: reading, analysis summary, and patient diagnosis.
    pub fn alert_message(measurement: &Measurement, patient: &Patient, reasoning: &str) -> String {
        format!(
            "{} (room {}, bed {}) has a {} reading of {}.\n\n\
             Analysis: {}\n\n\
             Patient diagnosis: {}",
            patient.name,
            patient.room_number,
            patient.bed_number,
            measurement.vital_type.display_name(),
            Self::measurement_value(measurement),
            reasoning,
            patient.diagnosis,
        )
    }

    /// Numbered suggestion checklist: tier-specific immediate actions, the
    /// per-type items from the reference table, and a follow-through item
    /// for every priority above low.
    pub fn suggestion_checklist(
        vital_type: VitalType,
        priority: AlertPriority,
        reference: &VitalReference,
    ) -> String {
        let mut items: Vec<&str> = Vec::new();

        match priority {
            AlertPriority::Critical => items.extend(CRITICAL_ACTIONS),
            AlertPriority::High => items.extend(HIGH_ACTIONS),
            _ => {}
        }

        for item in reference.suggestions_for(vital_type) {
            items.push(item.as_str());
        }

        if priority != AlertPriority::Low {
            items.push(FOLLOW_THROUGH);
        }

        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::models::Gender;

    use super::*;

    fn make_patient() -> Patient {
        Patient {
            id: Uuid::new_v4(),
            name: "Chen Mei-Ling".into(),
            age: 72,
            gender: Gender::Female,
            room_number: "302".into(),
            bed_number: "A".into(),
            diagnosis: "Hypertension".into(),
            admitted_on: NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
        }
    }

    fn make_measurement(vital_type: VitalType, value: f64, secondary: Option<f64>) -> Measurement {
        Measurement {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            vital_type,
            value,
            secondary_value: secondary,
            unit: vital_type.default_unit().to_string(),
            measured_at: NaiveDate::from_ymd_opt(2026, 3, 10)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            recorded_by: "Nurse Lin".into(),
        }
    }

    #[test]
    fn blood_pressure_value_renders_both_numbers() {
        let m = make_measurement(VitalType::BloodPressure, 150.0, Some(95.0));
        assert_eq!(MessageTemplates::measurement_value(&m), "150/95 mmHg");
    }

    #[test]
    fn temperature_renders_one_decimal() {
        let m = make_measurement(VitalType::Temperature, 38.0, None);
        assert_eq!(MessageTemplates::measurement_value(&m), "38.0 °C");
    }

    #[test]
    fn normal_range_for_blood_pressure_is_compound() {
        let reference = VitalReference::builtin();
        let range = reference.range_for(VitalType::BloodPressure).unwrap();
        assert_eq!(
            MessageTemplates::normal_range(VitalType::BloodPressure, range),
            "90-140/60-90 mmHg"
        );
    }

    #[test]
    fn title_prefix_tracks_priority() {
        let patient = make_patient();
        let critical =
            MessageTemplates::alert_title(VitalType::HeartRate, &patient, AlertPriority::Critical);
        assert!(critical.starts_with("URGENT: "));

        let medium =
            MessageTemplates::alert_title(VitalType::HeartRate, &patient, AlertPriority::Medium);
        assert!(medium.starts_with("Chen Mei-Ling"));
    }

    #[test]
    fn critical_checklist_leads_with_immediate_actions() {
        let reference = VitalReference::builtin();
        let checklist = MessageTemplates::suggestion_checklist(
            VitalType::BloodPressure,
            AlertPriority::Critical,
            &reference,
        );
        let lines: Vec<&str> = checklist.lines().collect();
        assert!(lines[0].contains("assess the patient immediately"));
        assert!(lines[1].contains("physician on duty"));
        assert!(checklist.contains("antihypertensive"));
        assert!(checklist.ends_with(FOLLOW_THROUGH));
    }

    #[test]
    fn low_checklist_has_no_urgent_items() {
        let reference = VitalReference::builtin();
        let checklist = MessageTemplates::suggestion_checklist(
            VitalType::BloodSugar,
            AlertPriority::Low,
            &reference,
        );
        assert!(!checklist.contains("immediately"));
        assert!(!checklist.contains(FOLLOW_THROUGH));
        assert!(checklist.starts_with("1. Check insulin"));
    }

    #[test]
    fn checklist_numbering_is_sequential() {
        let reference = VitalReference::builtin();
        let checklist = MessageTemplates::suggestion_checklist(
            VitalType::HeartRate,
            AlertPriority::High,
            &reference,
        );
        let numbers: Vec<String> = checklist
            .lines()
            .enumerate()
            .map(|(i, _)| format!("{}.", i + 1))
            .collect();
        for (line, number) in checklist.lines().zip(numbers) {
            assert!(line.starts_with(&number));
        }
    }
}
