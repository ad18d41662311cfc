//! Admin approval of newly registered staff accounts.

use crate::error::ClientError;
use crate::models::{Ack, Envelope, PendingUser};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};

pub fn pending_users(transport: &dyn Transport) -> Result<Vec<PendingUser>, ClientError> {
    let envelope: Envelope<Vec<PendingUser>> =
        send_json(transport, ApiRequest::get(routes::PENDING_USERS))?;
    Ok(envelope.data)
}

pub fn approve_user(transport: &dyn Transport, user_id: i64) -> Result<Ack, ClientError> {
    let ack = send_json(transport, ApiRequest::post(routes::user_approve(user_id)))?;
    tracing::info!(user_id, "User approved");
    Ok(ack)
}

pub fn reject_user(transport: &dyn Transport, user_id: i64) -> Result<Ack, ClientError> {
    let ack = send_json(transport, ApiRequest::post(routes::user_reject(user_id)))?;
    tracing::info!(user_id, "User rejected");
    Ok(ack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Method, MockTransport};
    use serde_json::{json, Value};

    #[test]
    fn pending_users_decoded() {
        let mock = MockTransport::new().respond(
            Method::Get,
            routes::PENDING_USERS,
            json!({"status": 200, "data": [
                {"id": 5, "name": "Ravi", "email": "ravi@clinic.example", "role": "Reception"}
            ]}),
        );
        let users = pending_users(&mock).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role.as_deref(), Some("Reception"));
        assert!(users[0].phone.is_none());
    }

    #[test]
    fn approve_and_reject_post_to_user() {
        let mock = MockTransport::new()
            .respond(Method::Post, &routes::user_approve(5), json!({"message": "User approved"}))
            .respond(Method::Post, &routes::user_reject(6), Value::Null);

        let ack = approve_user(&mock, 5).unwrap();
        assert_eq!(ack.message_or("done"), "User approved");
        let ack = reject_user(&mock, 6).unwrap();
        assert_eq!(ack.message_or("Rejected"), "Rejected");

        let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["accounts/users/5/approve/", "accounts/users/6/reject/"]);
    }

    #[test]
    fn forbidden_approval_surfaces_backend_message() {
        let mock = MockTransport::new().fail(
            Method::Post,
            &routes::user_approve(5),
            ClientError::from_response(403, r#"{"message":"Only admins can approve users"}"#),
        );
        let err = approve_user(&mock, 5).unwrap_err();
        assert_eq!(err.user_message(), "Only admins can approve users");
    }

}
