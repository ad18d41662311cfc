//! One function per backend endpoint.
//!
//! Every function takes the transport explicitly, validates its input
//! where a form exists, and decodes the response into typed models.

pub mod accounts;
pub mod appointments;
pub mod auth;
pub mod billing;
pub mod case_history;
pub mod dashboard;
pub mod followups;
pub mod inventory;
pub mod patients;
pub mod referrals;
pub mod trials;
pub mod visits;

/// Normalise a 1-based page number coming from callers.
pub(crate) fn page_param(page: u32) -> u32 {
    page.max(1)
}

/// Drop blank search strings.
pub(crate) fn search_param(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}
