use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AlertCategory, AlertPriority, AlertStatus};

/// An alert produced by the decision engine.
///
/// Created exclusively by the analysis pass with status `Pending`; the
/// engine never mutates an alert after creation. The lifecycle helpers
/// below exist for the workflow layer that confirms, dismisses, or
/// converts alerts into follow-up tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Reminder alerts for a patient with no readings reference no measurement.
    pub measurement_id: Option<Uuid>,
    pub category: AlertCategory,
    pub priority: AlertPriority,
    pub title: String,
    pub message: String,
    pub suggestion: String,
    pub status: AlertStatus,
    pub created_at: NaiveDateTime,
    pub confirmed_at: Option<NaiveDateTime>,
    pub confirmed_by: Option<String>,
}

impl Alert {
    /// Confirm a pending alert, recording who confirmed it and when.
    /// No-op (returns false) once the alert has reached a terminal status.
    pub fn confirm(&mut self, confirmed_by: &str, at: NaiveDateTime) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = AlertStatus::Confirmed;
        self.confirmed_at = Some(at);
        self.confirmed_by = Some(confirmed_by.to_string());
        true
    }

    /// Dismiss a pending alert. No-op on terminal statuses.
    pub fn dismiss(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = AlertStatus::Dismissed;
        true
    }

    /// Mark a pending alert as converted into a follow-up task.
    /// The task system only needs the alert's id, title, and suggestion;
    /// task creation itself happens outside the engine.
    pub fn convert(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = AlertStatus::Converted;
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn make_alert() -> Alert {
        Alert {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            measurement_id: Some(Uuid::new_v4()),
            category: AlertCategory::Abnormal,
            priority: AlertPriority::High,
            title: "Blood pressure abnormal".into(),
            message: "Reading outside normal range".into(),
            suggestion: "1. Check on the patient".into(),
            status: AlertStatus::Pending,
            created_at: NaiveDate::from_ymd_opt(2026, 3, 10)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            confirmed_at: None,
            confirmed_by: None,
        }
    }

    #[test]
    fn confirm_records_confirmer_and_timestamp() {
        let mut alert = make_alert();
        let at = alert.created_at;
        assert!(alert.confirm("Nurse Lin", at));
        assert_eq!(alert.status, AlertStatus::Confirmed);
        assert_eq!(alert.confirmed_by.as_deref(), Some("Nurse Lin"));
        assert_eq!(alert.confirmed_at, Some(at));
    }

    #[test]
    fn terminal_statuses_admit_no_transition() {
        let mut alert = make_alert();
        assert!(alert.dismiss());

        let at = alert.created_at;
        assert!(!alert.confirm("Nurse Lin", at));
        assert!(!alert.convert());
        assert!(!alert.dismiss());
        assert_eq!(alert.status, AlertStatus::Dismissed);
        assert!(alert.confirmed_by.is_none());
    }

    #[test]
    fn convert_is_terminal() {
        let mut alert = make_alert();
        assert!(alert.convert());
        assert_eq!(alert.status, AlertStatus::Converted);
        assert!(!alert.dismiss());
    }
}
