use crate::disposition::Disposition;
use crate::error::ClientError;
use crate::models::{Ack, AwaitingStockTrial, NewTrial, Page, TrialDevice, TrialQuery};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};
use crate::validation::validate_new_trial;

use super::{page_param, search_param};

/// Trials still waiting for a disposition.
pub fn list_active_trials(
    transport: &dyn Transport,
    page: u32,
) -> Result<Page<TrialDevice>, ClientError> {
    let request = ApiRequest::get(routes::TRIAL_ACTIVE_LIST).query("page", page_param(page));
    send_json(transport, request)
}

/// All trials, newest first, with optional search and filters.
pub fn list_trials(
    transport: &dyn Transport,
    query: &TrialQuery,
) -> Result<Page<TrialDevice>, ClientError> {
    let request = ApiRequest::get(routes::TRIAL_LIST)
        .query("page", page_param(query.page))
        .query_opt("search", search_param(query.search.as_deref()))
        .query_opt("ear_fitted", query.ear_fitted.as_deref())
        .query_opt("patient_response", query.patient_response.as_deref());
    send_json(transport, request)
}

/// Record a device handed to a patient for trial.
pub fn create_trial(transport: &dyn Transport, trial: &NewTrial) -> Result<Ack, ClientError> {
    validate_new_trial(trial)?;
    let request = ApiRequest::post(routes::TRIAL_CREATE).json(trial)?;
    let ack = send_json(transport, request)?;
    tracing::info!(visit = trial.visit, "Trial created");
    Ok(ack)
}

/// Submit the staff decision that ends (or extends) a trial.
pub fn complete_trial(
    transport: &dyn Transport,
    trial_id: i64,
    disposition: &Disposition,
) -> Result<Ack, ClientError> {
    let request = ApiRequest::post(routes::trial_complete(trial_id)).json(disposition)?;
    let ack = send_json(transport, request)?;
    tracing::info!(trial_id, decision = disposition.decision_literal(), "Trial disposition submitted");
    Ok(ack)
}

/// Booked trials whose device is out of stock.
pub fn list_awaiting_stock(
    transport: &dyn Transport,
    page: u32,
) -> Result<Page<AwaitingStockTrial>, ClientError> {
    let request = ApiRequest::get(routes::TRIAL_AWAITING_STOCK).query("page", page_param(page));
    send_json(transport, request)
}

/// Assign an in-stock serial to a trial awaiting stock.
pub fn allocate_serial(
    transport: &dyn Transport,
    trial_id: i64,
    serial: &str,
) -> Result<Ack, ClientError> {
    let serial = serial.trim();
    if serial.is_empty() {
        let mut errors = crate::error::FieldErrors::new();
        errors.add("booked_device_serial", "Serial number is required");
        return Err(ClientError::Validation(errors));
    }
    let request = ApiRequest::patch(routes::trial_allocate_serial(trial_id))
        .json(&serde_json::json!({ "booked_device_serial": serial }))?;
    let ack = send_json(transport, request)?;
    tracing::info!(trial_id, "Serial allocated to awaiting-stock trial");
    Ok(ack)
}
