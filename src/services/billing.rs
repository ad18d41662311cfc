use crate::error::ClientError;
use crate::models::{Ack, Bill, BillDetail, Envelope, Page, Payment};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};
use crate::validation::validate_payment;

use super::page_param;

pub fn paid_bills(transport: &dyn Transport, page: u32) -> Result<Page<Bill>, ClientError> {
    send_json(
        transport,
        ApiRequest::get(routes::BILLS_PAID).query("page", page_param(page)),
    )
}

pub fn due_bills(transport: &dyn Transport, page: u32) -> Result<Page<Bill>, ClientError> {
    send_json(
        transport,
        ApiRequest::get(routes::BILLS_DUE).query("page", page_param(page)),
    )
}

pub fn bill_for_visit(transport: &dyn Transport, visit_id: i64) -> Result<BillDetail, ClientError> {
    let envelope: Envelope<BillDetail> =
        send_json(transport, ApiRequest::get(routes::bill_for_visit(visit_id)))?;
    Ok(envelope.data)
}

pub fn mark_paid(transport: &dyn Transport, bill_id: i64, payment: &Payment) -> Result<Ack, ClientError> {
    validate_payment(payment)?;
    let request = ApiRequest::post(routes::bill_mark_paid(bill_id)).json(payment)?;
    let ack = send_json(transport, request)?;
    tracing::info!(bill_id, mode = %payment.payment_mode, "Bill marked paid");
    Ok(ack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMode;
    use crate::transport::{Method, MockTransport};
    use serde_json::json;

    #[test]
    fn bill_detail_includes_items() {
        let path = routes::bill_for_visit(8);
        let mock = MockTransport::new().respond(
            Method::Get,
            &path,
            json!({"status": 200, "data": {
                "id": 2, "visit": 8, "total_amount": 1500.0, "due_amount": 1500.0,
                "items": [{"item_type": "Service", "description": "PTA", "cost": 500.0, "quantity": 3}]
            }}),
        );
        let detail = bill_for_visit(&mock, 8).unwrap();
        assert_eq!(detail.bill.id, 2);
        assert_eq!(detail.items[0].line_total(), 1500.0);
    }

    #[test]
    fn zero_payment_rejected() {
        let mock = MockTransport::new();
        let payment = Payment { amount: 0.0, payment_mode: PaymentMode::Cash, notes: None };
        assert!(mark_paid(&mock, 1, &payment).is_err());
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn payment_body_uses_wire_mode() {
        let path = routes::bill_mark_paid(1);
        let mock = MockTransport::new().respond(Method::Post, &path, json!({"status": "success"}));
        let payment = Payment { amount: 250.0, payment_mode: PaymentMode::Upi, notes: None };
        mark_paid(&mock, 1, &payment).unwrap();
        assert_eq!(
            mock.last_request().unwrap().body.unwrap(),
            json!({"amount": 250.0, "payment_mode": "UPI"})
        );
    }
}
