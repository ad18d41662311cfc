use crate::error::ClientError;
use crate::models::{Page, PatientVisit, VisitQuery};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};

use super::{page_param, search_param};

/// The audiologist's appointment list, filtered like the visit list.
pub fn list(transport: &dyn Transport, query: &VisitQuery) -> Result<Page<PatientVisit>, ClientError> {
    let request = ApiRequest::get(routes::APPOINTMENT_LIST)
        .query("page", page_param(query.page))
        .query_opt("search", search_param(query.search.as_deref()))
        .query_opt("service_type", query.service_type.map(|s| s.as_str()));
    send_json(transport, request)
}
