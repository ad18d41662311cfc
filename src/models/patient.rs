use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{ReferralType, ServiceType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone_primary: Option<String>,
    #[serde(default)]
    pub phone_secondary: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub referral_type: Option<String>,
    #[serde(default)]
    pub referral_doctor: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Entry of the patient flat list used for search-as-you-type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone_primary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitDetail {
    pub visit_type: String,
}

/// Registration form: a new patient plus their first visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    pub gender: String,
    pub phone_primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_secondary: Option<String>,
    pub city: String,
    pub address: String,
    pub referral_type: Option<ReferralType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_doctor: Option<String>,
    pub service_type: Option<ServiceType>,
    pub appointment_date: Option<NaiveDate>,
    pub visit_details: Vec<VisitDetail>,
}

/// Partial update; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl PatientUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Filters for the paged patient list. `limit` falls back to the
/// backend's page size when unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientQuery {
    pub page: u32,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

/// A device purchase recorded against a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_serializes_only_present_fields() {
        let update = PatientUpdate {
            city: Some("Pune".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"city": "Pune"}));
        assert!(!update.is_empty());
        assert!(PatientUpdate::default().is_empty());
    }
}
