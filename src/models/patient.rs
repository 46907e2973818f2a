use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Gender;

/// A patient record as provided by the external patient registry.
/// The diagnosis field is free text; the engine only keyword-matches it,
/// it never parses it into structured conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub room_number: String,
    pub bed_number: String,
    pub diagnosis: String,
    pub admitted_on: NaiveDate,
}
