use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::InvalidEnum;

/// Type of vital sign measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalType {
    BloodPressure,
    BloodSugar,
    HeartRate,
    Temperature,
    OxygenSaturation,
    Weight,
}

impl VitalType {
    pub fn as_str(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "blood_pressure",
            VitalType::BloodSugar => "blood_sugar",
            VitalType::HeartRate => "heart_rate",
            VitalType::Temperature => "temperature",
            VitalType::OxygenSaturation => "oxygen_saturation",
            VitalType::Weight => "weight",
        }
    }

    /// All measurement types, in dashboard display order.
    pub fn all() -> &'static [VitalType] {
        &[
            VitalType::BloodPressure,
            VitalType::BloodSugar,
            VitalType::HeartRate,
            VitalType::Temperature,
            VitalType::OxygenSaturation,
            VitalType::Weight,
        ]
    }

    /// Default unit for this vital type.
    pub fn default_unit(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "mmHg",
            VitalType::BloodSugar => "mg/dL",
            VitalType::HeartRate => "bpm",
            VitalType::Temperature => "°C",
            VitalType::OxygenSaturation => "%",
            VitalType::Weight => "kg",
        }
    }

    /// Human-readable name used in alert titles and messages.
    pub fn display_name(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "blood pressure",
            VitalType::BloodSugar => "blood sugar",
            VitalType::HeartRate => "heart rate",
            VitalType::Temperature => "temperature",
            VitalType::OxygenSaturation => "oxygen saturation",
            VitalType::Weight => "weight",
        }
    }
}

impl std::str::FromStr for VitalType {
    type Err = InvalidEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blood_pressure" => Ok(VitalType::BloodPressure),
            "blood_sugar" => Ok(VitalType::BloodSugar),
            "heart_rate" => Ok(VitalType::HeartRate),
            "temperature" => Ok(VitalType::Temperature),
            "oxygen_saturation" => Ok(VitalType::OxygenSaturation),
            "weight" => Ok(VitalType::Weight),
            _ => Err(InvalidEnum {
                field: "VitalType".into(),
                value: s.into(),
            }),
        }
    }
}

/// A single vital sign measurement. Immutable once created; the engine
/// only reads measurements, never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub vital_type: VitalType,
    pub value: f64,
    pub secondary_value: Option<f64>, // diastolic for blood_pressure
    pub unit: String,
    pub measured_at: NaiveDateTime,
    pub recorded_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn vital_type_round_trip() {
        for vital_type in VitalType::all() {
            assert_eq!(
                VitalType::from_str(vital_type.as_str()).unwrap(),
                *vital_type
            );
        }
    }

    #[test]
    fn unknown_vital_type_rejected() {
        let err = VitalType::from_str("respiratory_rate").unwrap_err();
        assert_eq!(err.field, "VitalType");
        assert_eq!(err.value, "respiratory_rate");
    }

    #[test]
    fn default_units() {
        assert_eq!(VitalType::BloodPressure.default_unit(), "mmHg");
        assert_eq!(VitalType::OxygenSaturation.default_unit(), "%");
        assert_eq!(VitalType::Temperature.default_unit(), "°C");
    }
}
