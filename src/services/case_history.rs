//! Audiologist case history and uploaded test reports.

use crate::error::ClientError;
use crate::models::{Ack, CaseHistory, Envelope, NewCaseHistory, TestReport, TestReportFile};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport, Upload};
use crate::validation::{validate_case_history, validate_test_report};

pub fn get(transport: &dyn Transport, visit_id: i64) -> Result<CaseHistory, ClientError> {
    let envelope: Envelope<CaseHistory> =
        send_json(transport, ApiRequest::get(routes::case_history(visit_id)))?;
    Ok(envelope.data)
}

/// Record the case history and requested tests for a visit.
pub fn record(transport: &dyn Transport, form: &NewCaseHistory) -> Result<Ack, ClientError> {
    validate_case_history(form)?;
    let request = ApiRequest::post(routes::CASE_HISTORY_CREATE).json(form)?;
    let ack = send_json(transport, request)?;
    tracing::info!(
        visit_id = form.visit,
        tests = form.test_requested.len(),
        "Case history recorded"
    );
    Ok(ack)
}

/// Upload a report file as `multipart/form-data`.
pub fn upload_report(transport: &dyn Transport, file: &TestReportFile) -> Result<Ack, ClientError> {
    validate_test_report(file)?;
    let upload = Upload {
        fields: vec![
            ("patient_visit".to_string(), file.visit_id.to_string()),
            ("file_type".to_string(), file.file_type.clone()),
        ],
        file_field: "file".to_string(),
        file_name: file.file_name.clone(),
        content_type: file.content_type.clone(),
        bytes: file.bytes.clone(),
    };
    let ack = send_json(transport, ApiRequest::post(routes::TEST_FILE_UPLOAD).multipart(upload))?;
    tracing::info!(
        visit_id = file.visit_id,
        file_type = %file.file_type,
        size = file.bytes.len(),
        "Test report uploaded"
    );
    Ok(ack)
}

pub fn reports(transport: &dyn Transport, visit_id: i64) -> Result<Vec<TestReport>, ClientError> {
    let envelope: Envelope<Vec<TestReport>> =
        send_json(transport, ApiRequest::get(routes::test_files(visit_id)))?;
    Ok(envelope.data)
}

pub fn delete_report(transport: &dyn Transport, report_id: i64) -> Result<Ack, ClientError> {
    let ack = send_json(transport, ApiRequest::delete(routes::test_file_delete(report_id)))?;
    tracing::info!(report_id, "Test report deleted");
    Ok(ack)
}
