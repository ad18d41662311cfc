use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audiologist intake notes recorded for a visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseNotes {
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub family_history: String,
    #[serde(default)]
    pub noise_exposure: String,
    #[serde(default)]
    pub previous_ha_experience: String,
    #[serde(default)]
    pub red_flags: String,
}

/// Case history of one visit, as shown on the audiologist screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseHistory {
    pub visit_id: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    /// `None` until the audiologist has filled the form.
    #[serde(default)]
    pub case_history: Option<CaseNotes>,
    #[serde(default)]
    pub test_requested: Vec<String>,
}

impl CaseHistory {
    pub fn is_recorded(&self) -> bool {
        self.case_history.is_some()
    }
}

/// Case history form plus the tests the audiologist requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewCaseHistory {
    pub visit: i64,
    #[serde(flatten)]
    pub notes: CaseNotes,
    pub test_requested: Vec<String>,
}

/// An uploaded test report (audiogram, OAE printout, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub id: i64,
    pub file_type: String,
    #[serde(default, alias = "file_path")]
    pub file_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A report file waiting to be uploaded for a visit.
#[derive(Debug, Clone, PartialEq)]
pub struct TestReportFile {
    pub visit_id: i64,
    pub file_type: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
