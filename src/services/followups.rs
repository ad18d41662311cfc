use crate::error::ClientError;
use crate::models::{Ack, Followup, Page};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};

use super::page_param;

/// Pending (`contacted = false`) or completed follow-up calls.
pub fn list(transport: &dyn Transport, page: u32, contacted: bool) -> Result<Page<Followup>, ClientError> {
    let request = ApiRequest::get(routes::FOLLOWUP_LIST)
        .query("page", page_param(page))
        .query("contacted", contacted);
    send_json(transport, request)
}

pub fn mark_contacted(transport: &dyn Transport, visit_id: i64) -> Result<Ack, ClientError> {
    let ack = send_json(transport, ApiRequest::post(routes::visit_mark_contacted(visit_id)))?;
    tracing::info!(visit_id, "Follow-up marked contacted");
    Ok(ack)
}
