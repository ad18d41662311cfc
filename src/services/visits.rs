use crate::error::ClientError;
use crate::models::{Ack, Envelope, NewVisit, Page, PatientVisit, VisitQuery, VisitUpdate};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};
use crate::validation::validate_new_visit;

use super::{page_param, search_param};

pub fn list(transport: &dyn Transport, query: &VisitQuery) -> Result<Page<PatientVisit>, ClientError> {
    let request = ApiRequest::get(routes::VISIT_LIST)
        .query("page", page_param(query.page))
        .query_opt("search", search_param(query.search.as_deref()))
        .query_opt("service_type", query.service_type.map(|s| s.as_str()));
    send_json(transport, request)
}

pub fn today(transport: &dyn Transport, page: u32) -> Result<Page<PatientVisit>, ClientError> {
    let request = ApiRequest::get(routes::VISITS_TODAY).query("page", page_param(page));
    send_json(transport, request)
}

pub fn detail(transport: &dyn Transport, visit_id: i64) -> Result<PatientVisit, ClientError> {
    let envelope: Envelope<PatientVisit> =
        send_json(transport, ApiRequest::get(routes::visit_detail(visit_id)))?;
    Ok(envelope.data)
}

/// Schedule a new visit for an existing patient.
pub fn create(transport: &dyn Transport, visit: &NewVisit) -> Result<Ack, ClientError> {
    validate_new_visit(visit)?;
    let request = ApiRequest::post(routes::VISIT_CREATE).json(visit)?;
    let ack = send_json(transport, request)?;
    tracing::info!(patient = visit.patient, "Visit scheduled");
    Ok(ack)
}

pub fn update(
    transport: &dyn Transport,
    visit_id: i64,
    update: &VisitUpdate,
) -> Result<Ack, ClientError> {
    let request = ApiRequest::patch(routes::visit_update(visit_id)).json(update)?;
    send_json(transport, request)
}
