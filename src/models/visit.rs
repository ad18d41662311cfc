use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ServiceType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientVisit {
    pub id: i64,
    #[serde(default)]
    pub patient: Option<i64>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_note: Option<String>,
    #[serde(default)]
    pub appointment_date: Option<NaiveDate>,
    #[serde(default)]
    pub seen_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewVisit {
    pub patient: i64,
    pub service_type: Option<ServiceType>,
    pub appointment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisitUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
}

/// A TGA service visit (repair, tuning, cleaning) on the patient profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceVisit {
    pub id: i64,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub present_complaint: Option<String>,
    #[serde(default)]
    pub seen_by: Option<String>,
}

/// Filters for the visit list; `service_type` of `None` means all services.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitQuery {
    pub page: u32,
    pub search: Option<String>,
    pub service_type: Option<ServiceType>,
}
