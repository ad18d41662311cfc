use crate::error::ClientError;
use crate::models::{Envelope, ReferralDoctor, ReferredPatient};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};

use super::search_param;

pub fn doctors(transport: &dyn Transport) -> Result<Vec<ReferralDoctor>, ClientError> {
    let envelope: Envelope<Vec<ReferralDoctor>> =
        send_json(transport, ApiRequest::get(routes::REFERRAL_DOCTORS))?;
    Ok(envelope.data)
}

/// Visits referred by `doctor` (matched on the doctor's name).
/// A blank name lists every referral.
pub fn referred_patients(
    transport: &dyn Transport,
    doctor: Option<&str>,
) -> Result<Vec<ReferredPatient>, ClientError> {
    let request =
        ApiRequest::get(routes::PATIENT_REFERRALS).query_opt("referral_doctor", search_param(doctor));
    let envelope: Envelope<Vec<ReferredPatient>> = send_json(transport, request)?;
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Method, MockTransport};
    use serde_json::json;

    #[test]
    fn doctors_read_clinic_name() {
        let mock = MockTransport::new().respond(
            Method::Get,
            routes::REFERRAL_DOCTORS,
            json!({"data": [{"id": 1, "referral_doctor": "Dr. Kulkarni", "clinic__name": "Pune ENT"}]}),
        );
        let list = doctors(&mock).unwrap();
        assert_eq!(list[0].clinic_name.as_deref(), Some("Pune ENT"));
    }

    #[test]
    fn referred_patients_filter_by_doctor() {
        let mock = MockTransport::new().respond(
            Method::Get,
            routes::PATIENT_REFERRALS,
            json!({"data": [{"patient_name": "Anita", "visit_date": "2026-10-02",
                             "visit_type": "New Hearing Test", "final_amount": 1200.0}]}),
        );
        let patients = referred_patients(&mock, Some("Dr. Kulkarni")).unwrap();
        assert_eq!(patients[0].final_amount, Some(1200.0));
        assert_eq!(
            mock.last_request().unwrap().query_value("referral_doctor"),
            Some("Dr. Kulkarni")
        );

        referred_patients(&mock, Some("  ")).unwrap();
        assert!(mock.last_request().unwrap().query.is_empty());
    }
}
