use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A doctor who refers patients to the clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralDoctor {
    pub id: i64,
    pub referral_doctor: String,
    #[serde(default, rename = "clinic__name")]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A visit brought in by a referral doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferredPatient {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub visit_type: Option<String>,
    #[serde(default)]
    pub present_complaint: Option<String>,
    #[serde(default)]
    pub final_amount: Option<f64>,
}
