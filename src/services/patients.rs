use crate::error::{ClientError, FieldErrors};
use crate::models::{
    Ack, Envelope, NewPatient, Page, Patient, PatientQuery, PatientSummary, PatientUpdate,
    PatientVisit, Purchase, ServiceVisit,
};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};
use crate::validation::validate_new_patient;

use super::{page_param, search_param};

/// Register a patient together with their first visit.
pub fn register(transport: &dyn Transport, patient: &NewPatient) -> Result<Ack, ClientError> {
    validate_new_patient(patient)?;
    let request = ApiRequest::post(routes::PATIENT_REGISTER).json(patient)?;
    let ack = send_json(transport, request)?;
    tracing::info!("Patient registered");
    Ok(ack)
}

/// Paged patient list with optional name/phone search.
pub fn list(transport: &dyn Transport, query: &PatientQuery) -> Result<Page<PatientVisit>, ClientError> {
    let request = ApiRequest::get(routes::VISIT_LIST)
        .query("page", page_param(query.page))
        .query_opt("limit", query.limit.filter(|l| *l > 0))
        .query_opt("search", search_param(query.search.as_deref()));
    send_json(transport, request)
}

/// Remove a patient record from the list.
pub fn delete(transport: &dyn Transport, record_id: i64) -> Result<Ack, ClientError> {
    let ack = send_json(transport, ApiRequest::delete(routes::visit_detail(record_id)))?;
    tracing::info!(record_id, "Patient record deleted");
    Ok(ack)
}

pub fn get(transport: &dyn Transport, patient_id: i64) -> Result<Patient, ClientError> {
    let envelope: Envelope<Patient> = send_json(transport, ApiRequest::get(routes::patient(patient_id)))?;
    Ok(envelope.data)
}

/// Partial update. An empty update is rejected without a request.
pub fn update(
    transport: &dyn Transport,
    patient_id: i64,
    update: &PatientUpdate,
) -> Result<Ack, ClientError> {
    if update.is_empty() {
        let mut errors = FieldErrors::new();
        errors.add("patient", "Nothing to update");
        return Err(ClientError::Validation(errors));
    }
    if let Some(phone) = update.phone_primary.as_deref() {
        let mut v = crate::validation::Validator::new();
        v.phone("phone_primary", phone);
        v.finish()?;
    }
    let request = ApiRequest::patch(routes::patient_update(patient_id)).json(update)?;
    send_json(transport, request)
}

pub fn visits(transport: &dyn Transport, patient_id: i64) -> Result<Vec<PatientVisit>, ClientError> {
    let envelope: Envelope<Vec<PatientVisit>> =
        send_json(transport, ApiRequest::get(routes::patient_visits(patient_id)))?;
    Ok(envelope.data)
}

pub fn purchases(transport: &dyn Transport, patient_id: i64) -> Result<Vec<Purchase>, ClientError> {
    let envelope: Envelope<Vec<Purchase>> =
        send_json(transport, ApiRequest::get(routes::patient_purchases(patient_id)))?;
    Ok(envelope.data)
}

/// TGA service visits on the patient profile.
pub fn service_visits(
    transport: &dyn Transport,
    patient_id: i64,
    page: u32,
) -> Result<Page<ServiceVisit>, ClientError> {
    let request =
        ApiRequest::get(routes::patient_service_visits(patient_id)).query("page", page_param(page));
    send_json(transport, request)
}

/// Name/phone lookup for dropdowns. A blank term returns nothing
/// without calling the backend.
pub fn search(transport: &dyn Transport, term: &str) -> Result<Vec<PatientSummary>, ClientError> {
    let Some(term) = search_param(Some(term)) else {
        return Ok(Vec::new());
    };
    let request = ApiRequest::get(routes::PATIENT_FLAT_LIST).query("search", term);
    let envelope: Envelope<Vec<PatientSummary>> = send_json(transport, request)?;
    Ok(envelope.data)
}
