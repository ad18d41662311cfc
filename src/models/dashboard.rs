use serde::{Deserialize, Serialize};

/// Counters shown on the role dashboards. Absent counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_patients: u64,
    pub today_visits: u64,
    pub pending_followups: u64,
    pub active_trials: u64,
    pub pending_bills: u64,
}
