use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A visit scheduled for a follow-up call from reception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followup {
    pub id: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub followup_date: Option<NaiveDate>,
    #[serde(default)]
    pub contacted: bool,
    #[serde(default)]
    pub status_note: Option<String>,
}
