use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::TrialDecision;

/// A device on loan to a patient for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialDevice {
    pub id: i64,
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub assigned_patient: String,
    #[serde(default)]
    pub assigned_patient_phone: Option<String>,
    #[serde(default)]
    pub trial_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub trial_end_date: Option<NaiveDate>,
    pub trial_decision: TrialDecision,
}

impl TrialDevice {
    /// Days left until the trial ends, negative once overdue.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.trial_end_date.map(|end| (end - today).num_days())
    }
}

/// "Trial given" form: a device handed to a patient during a visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTrial {
    pub visit: i64,
    pub device_inventory_id: Option<i64>,
    pub serial_number: String,
    pub receiver_size: String,
    pub ear_fitted: String,
    pub dome_type: String,
    pub srt_before: String,
    pub sds_before: String,
    pub ucl_before: String,
    pub gain_settings: String,
    pub patient_response: String,
    pub counselling_notes: String,
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_offered: Option<f64>,
    pub trial_start_date: Option<NaiveDate>,
    pub trial_end_date: Option<NaiveDate>,
}

/// Filters for the full trial list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialQuery {
    pub page: u32,
    pub search: Option<String>,
    pub ear_fitted: Option<String>,
    pub patient_response: Option<String>,
}

/// A booked trial waiting for stock of the chosen device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwaitingStockTrial {
    pub id: i64,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub booked_device_inventory: Option<i64>,
    #[serde(default)]
    pub booked_device_name: Option<String>,
    #[serde(default)]
    pub trial_completed_at: Option<chrono::DateTime<chrono::Utc>>,
}
