//! Full-sweep batch analysis.
//!
//! Unlike the traced single-measurement path, the sweep grades each
//! reading against per-type threshold bands with their own priorities and
//! wording, falls back to the split-window trend check for in-range
//! readings, and generates follow-up reminders for overdue measurement
//! schedules. Sweep output deduplicates per (patient, category, title)
//! and keeps arrival order.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::{
    Alert, AlertCategory, AlertPriority, AlertStatus, Measurement, Patient, VitalType,
};

use super::dedup::dedup_by_title;
use super::messages::MessageTemplates;
use super::reference::VitalReference;
use super::trend::split_window_shift;

/// A shift beyond this marks a trend alert as high priority.
const SHIFT_HIGH_PERCENT: f64 = 25.0;
/// A measurement older than this triggers an overdue reminder.
const REMINDER_OVERDUE_MINUTES: i64 = 8 * 60;

fn build_alert(
    patient: &Patient,
    measurement_id: Option<Uuid>,
    category: AlertCategory,
    priority: AlertPriority,
    title: String,
    message: String,
    suggestion: String,
) -> Alert {
    Alert {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        measurement_id,
        category,
        priority,
        title,
        message,
        suggestion,
        status: AlertStatus::Pending,
        created_at: chrono::Local::now().naive_local(),
        confirmed_at: None,
        confirmed_by: None,
    }
}

struct Band {
    priority: AlertPriority,
    title: String,
    message: String,
    suggestion: String,
}

/// Grade one measurement against the sweep's threshold bands. Readings
/// that hit no band fall through to the split-window trend check.
pub fn sweep_measurement(
    measurement: &Measurement,
    patient: &Patient,
    history: &[Measurement],
    reference: &VitalReference,
) -> Option<Alert> {
    match grade(measurement, patient, reference) {
        Some(band) => Some(build_alert(
            patient,
            Some(measurement.id),
            AlertCategory::Abnormal,
            band.priority,
            band.title,
            band.message,
            band.suggestion,
        )),
        None => trend_alert(measurement, patient, history),
    }
}

fn grade(measurement: &Measurement, patient: &Patient, reference: &VitalReference) -> Option<Band> {
    let range = reference.range_for(measurement.vital_type)?;
    let value = measurement.value;
    let reading = MessageTemplates::measurement_value(measurement);

    match measurement.vital_type {
        VitalType::BloodPressure => {
            let systolic = value;
            let diastolic = measurement.secondary_value;
            let secondary_max = range.secondary_max.unwrap_or(90.0);
            let secondary_min = range.secondary_min.unwrap_or(60.0);

            let crisis =
                systolic > 180.0 || diastolic.map(|d| d > 120.0).unwrap_or(false);
            let high_side = systolic > range.max
                || diastolic.map(|d| d > secondary_max).unwrap_or(false);
            let low_side = systolic < range.min
                || diastolic.map(|d| d < secondary_min).unwrap_or(false);

            if crisis {
                Some(Band {
                    priority: AlertPriority::Critical,
                    title: "Blood pressure at crisis level".into(),
                    message: format!(
                        "{}'s blood pressure reads {}, at hypertensive crisis level; \
                         immediate handling is required.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Notify the physician on duty immediately",
                        "Prepare antihypertensive medication",
                        "Keep monitoring and record the level of consciousness",
                    ]),
                })
            } else if high_side {
                Some(Band {
                    priority: if systolic > 160.0 {
                        AlertPriority::High
                    } else {
                        AlertPriority::Medium
                    },
                    title: "Blood pressure elevated".into(),
                    message: format!(
                        "{}'s blood pressure reads {}, above the normal range.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Check the patient's symptoms",
                        "Review medication use",
                        "Notify the physician if needed",
                    ]),
                })
            } else if low_side {
                Some(Band {
                    priority: if systolic < 80.0 {
                        AlertPriority::Critical
                    } else {
                        AlertPriority::High
                    },
                    title: "Low blood pressure warning".into(),
                    message: format!(
                        "{}'s blood pressure reads {}, below the normal range.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Assess consciousness and peripheral circulation",
                        "Check for dehydration or bleeding",
                        "Notify the physician for evaluation",
                    ]),
                })
            } else {
                None
            }
        }
        VitalType::BloodSugar => {
            if value > 300.0 {
                Some(Band {
                    priority: AlertPriority::Critical,
                    title: "Blood sugar at dangerous level".into(),
                    message: format!(
                        "{}'s blood sugar reads {}, severely elevated; watch for \
                         diabetic ketoacidosis.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Notify the physician immediately",
                        "Test urine ketones",
                        "Prepare insulin and IV fluids",
                    ]),
                })
            } else if value > range.max {
                Some(Band {
                    priority: if value > 200.0 {
                        AlertPriority::High
                    } else {
                        AlertPriority::Medium
                    },
                    title: "Blood sugar elevated".into(),
                    message: format!(
                        "{}'s blood sugar reads {}, above the target range.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Check insulin administration",
                        "Review recent food intake",
                        "Watch for hyperglycemia symptoms",
                    ]),
                })
            } else if value < 70.0 {
                Some(Band {
                    priority: if value < 50.0 {
                        AlertPriority::Critical
                    } else {
                        AlertPriority::High
                    },
                    title: "Low blood sugar warning".into(),
                    message: format!(
                        "{}'s blood sugar reads {}, at risk of hypoglycemia.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Give sugar supplementation now",
                        "Monitor the level of consciousness",
                        "Check for medication overdose",
                    ]),
                })
            } else {
                None
            }
        }
        VitalType::HeartRate => {
            if value > 150.0 || value < 40.0 {
                Some(Band {
                    priority: AlertPriority::Critical,
                    title: if value > 150.0 {
                        "Severe tachycardia".into()
                    } else {
                        "Severe bradycardia".into()
                    },
                    message: format!(
                        "{}'s heart rate reads {}; immediate handling is required.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Take an ECG immediately",
                        "Notify the physician",
                        "Prepare resuscitation equipment",
                    ]),
                })
            } else if value > range.max {
                Some(Band {
                    priority: if value > 120.0 {
                        AlertPriority::High
                    } else {
                        AlertPriority::Medium
                    },
                    title: "Heart rate elevated".into(),
                    message: format!(
                        "{}'s heart rate reads {}, above the normal range.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Assess for palpitations or discomfort",
                        "Review medication use",
                        "Take an ECG if needed",
                    ]),
                })
            } else if value < range.min {
                Some(Band {
                    priority: if value < 50.0 {
                        AlertPriority::High
                    } else {
                        AlertPriority::Medium
                    },
                    title: "Heart rate low".into(),
                    message: format!(
                        "{}'s heart rate reads {}, below the normal range.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Assess consciousness and activity tolerance",
                        "Check for rate-lowering medication",
                        "Notify the physician for evaluation",
                    ]),
                })
            } else {
                None
            }
        }
        VitalType::Temperature => {
            if value >= 39.5 {
                Some(Band {
                    priority: AlertPriority::Critical,
                    title: "High fever warning".into(),
                    message: format!(
                        "{}'s temperature reads {}; active cooling is required.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Give antipyretic medication now",
                        "Apply physical cooling",
                        "Track the infection source and notify the physician",
                    ]),
                })
            } else if value > range.max {
                Some(Band {
                    priority: if value > 38.5 {
                        AlertPriority::High
                    } else {
                        AlertPriority::Medium
                    },
                    title: "Temperature elevated".into(),
                    message: format!(
                        "{}'s temperature reads {}; the patient is running a fever.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Monitor the temperature course",
                        "Assess the effect of antipyretics",
                        "Watch for signs of infection",
                    ]),
                })
            } else if value < 35.5 {
                Some(Band {
                    priority: AlertPriority::High,
                    title: "Low temperature warning".into(),
                    message: format!(
                        "{}'s temperature reads {}; keep the patient warm.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Add warming measures",
                        "Assess peripheral circulation",
                        "Check the room temperature",
                    ]),
                })
            } else {
                None
            }
        }
        VitalType::OxygenSaturation => {
            if value < 90.0 {
                Some(Band {
                    priority: AlertPriority::Critical,
                    title: "Oxygen saturation severely low".into(),
                    message: format!(
                        "{}'s oxygen saturation reads {}; immediate handling is required.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Increase the oxygen supply immediately",
                        "Check airway patency",
                        "Notify the physician urgently",
                    ]),
                })
            } else if value < range.min {
                Some(Band {
                    priority: if value < 92.0 {
                        AlertPriority::High
                    } else {
                        AlertPriority::Medium
                    },
                    title: "Oxygen saturation low".into(),
                    message: format!(
                        "{}'s oxygen saturation reads {}, below the normal value.",
                        patient.name, reading
                    ),
                    suggestion: numbered(&[
                        "Check that the oxygen equipment is working",
                        "Assess the breathing pattern",
                        "Adjust the oxygen flow if needed",
                    ]),
                })
            } else {
                None
            }
        }
        // Weight has no threshold bands; only trends apply.
        VitalType::Weight => None,
    }
}

fn numbered(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalized(vital_type: VitalType) -> String {
    let name = vital_type.display_name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Raise a trend alert when the split-window heuristic reports a
/// sustained shift. High priority beyond a 25% shift, medium otherwise.
pub fn trend_alert(
    measurement: &Measurement,
    patient: &Patient,
    history: &[Measurement],
) -> Option<Alert> {
    let shift = split_window_shift(measurement, history)?;
    let direction = if shift.rising() { "upward" } else { "downward" };
    let vital = measurement.vital_type.display_name();

    let priority = if shift.change_percent.abs() > SHIFT_HIGH_PERCENT {
        AlertPriority::High
    } else {
        AlertPriority::Medium
    };

    Some(build_alert(
        patient,
        Some(measurement.id),
        AlertCategory::Trend,
        priority,
        format!("{} trending {}", capitalized(measurement.vital_type), direction),
        format!(
            "{}'s {} has been trending {} recently, a change of about {:.1}%.",
            patient.name,
            vital,
            direction,
            shift.change_percent.abs()
        ),
        format!("Monitor {} closely and evaluate possible causes.", vital),
    ))
}

/// Remind the ward when a scheduled measurement is missing or overdue.
///
/// No reading on record yields a medium-priority reminder with no
/// measurement reference; a reading older than eight hours yields a
/// low-priority overdue reminder.
pub fn follow_up_reminder(
    patient: &Patient,
    vital_type: VitalType,
    last: Option<&Measurement>,
    now: NaiveDateTime,
) -> Option<Alert> {
    let vital = vital_type.display_name();

    let Some(last) = last else {
        return Some(build_alert(
            patient,
            None,
            AlertCategory::Reminder,
            AlertPriority::Medium,
            format!("{} measurement reminder", capitalized(vital_type)),
            format!("{} has no {} reading recorded today.", patient.name, vital),
            format!("Schedule a {} measurement.", vital),
        ));
    };

    let since = now - last.measured_at;
    if since.num_minutes() > REMINDER_OVERDUE_MINUTES {
        return Some(build_alert(
            patient,
            Some(last.id),
            AlertCategory::Reminder,
            AlertPriority::Low,
            format!("{} follow-up reminder", capitalized(vital_type)),
            format!(
                "{} has gone {} hours without a {} reading.",
                patient.name,
                since.num_hours(),
                vital
            ),
            format!("Schedule a {} measurement to keep tracking.", vital),
        ));
    }

    None
}

/// Sweep every measurement, collapse per (patient, category, title), and
/// keep the survivors in arrival order.
pub fn sweep_all(
    measurements: &[Measurement],
    patients: &[Patient],
    reference: &VitalReference,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for measurement in measurements {
        let Some(patient) = patients.iter().find(|p| p.id == measurement.patient_id) else {
            continue;
        };

        let history: Vec<Measurement> = measurements
            .iter()
            .filter(|m| m.patient_id == patient.id)
            .cloned()
            .collect();

        if let Some(alert) = sweep_measurement(measurement, patient, &history, reference) {
            alerts.push(alert);
        }
    }

    let deduped = dedup_by_title(alerts);

    tracing::info!(
        measurements = measurements.len(),
        alerts = deduped.len(),
        "Full sweep complete"
    );

    deduped
}
