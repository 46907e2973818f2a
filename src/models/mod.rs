pub mod alert;
pub mod enums;
pub mod measurement;
pub mod patient;

pub use alert::Alert;
pub use enums::{AlertCategory, AlertPriority, AlertStatus, Gender, InvalidEnum};
pub use measurement::{Measurement, VitalType};
pub use patient::Patient;
