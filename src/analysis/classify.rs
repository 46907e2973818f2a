use crate::models::{Measurement, VitalType};

use super::reference::{ValueField, VitalReference};

/// Outcome of the threshold classification for one measurement.
#[derive(Debug, Clone)]
pub struct Classification {
    pub in_range: bool,
    /// Set when a critical-value rule fired. Takes absolute precedence over
    /// the additive severity score.
    pub critical: Option<CriticalFinding>,
}

#[derive(Debug, Clone)]
pub struct CriticalFinding {
    pub reason: String,
}

/// Compare a measurement against the normal-range and critical-value tables.
///
/// Blood pressure is in range only when the systolic value and, when
/// present, the diastolic value both fall inside their bounds; an absent
/// diastolic value is tolerated, not an error. A vital type with no range
/// entry cannot be judged and counts as in range.
pub fn classify(measurement: &Measurement, reference: &VitalReference) -> Classification {
    Classification {
        in_range: check_normal_range(measurement, reference),
        critical: check_critical_values(measurement, reference),
    }
}

fn check_normal_range(measurement: &Measurement, reference: &VitalReference) -> bool {
    let Some(range) = reference.range_for(measurement.vital_type) else {
        return true;
    };

    let primary_ok = measurement.value >= range.min && measurement.value <= range.max;

    if measurement.vital_type == VitalType::BloodPressure {
        let secondary_ok = match (
            measurement.secondary_value,
            range.secondary_min,
            range.secondary_max,
        ) {
            (Some(diastolic), Some(min), Some(max)) => diastolic >= min && diastolic <= max,
            _ => true,
        };
        return primary_ok && secondary_ok;
    }

    primary_ok
}

/// Critical override check. Runs independently of the range comparison;
/// the first crossed rule wins and supplies the displayed reasoning.
fn check_critical_values(
    measurement: &Measurement,
    reference: &VitalReference,
) -> Option<CriticalFinding> {
    for rule in reference.critical_rules_for(measurement.vital_type) {
        let value = match rule.field {
            ValueField::Primary => Some(measurement.value),
            ValueField::Secondary => measurement.secondary_value,
        };
        // A rule against an absent secondary value is not applicable.
        let Some(value) = value else { continue };

        if rule.bound.crossed(value) {
            return Some(CriticalFinding {
                reason: rule.reason.clone(),
            });
        }
    }
    None
}
