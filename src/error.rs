//! Client error types and backend error-body decoding.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Notice text used when nothing more specific is known.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Keys of a backend error body that never carry per-field messages.
const ENVELOPE_KEYS: &[&str] = &["status", "message", "error", "detail", "errors"];

/// Per-field validation messages, keyed by field name.
///
/// Only the first message for each field is kept, matching how the
/// forms display one inline error per input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field` unless one is already present.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise a [`ClientError::Validation`].
    pub fn into_result(self) -> Result<(), ClientError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Clinic API is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Clinic API returned error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        field_errors: FieldErrors,
    },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Session(String),
}

impl ClientError {
    /// Build an error from a non-success HTTP status and its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();
        let (message, field_errors) = match &parsed {
            Some(value) => extract_error(value),
            None => (None, FieldErrors::new()),
        };

        if status == 401 {
            return ClientError::Unauthorized(
                message.unwrap_or_else(|| "Authentication credentials were not provided".into()),
            );
        }

        let message = message
            .or_else(|| field_errors.iter().next().map(|(_, m)| m.to_string()))
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());

        ClientError::Api {
            status,
            message,
            field_errors,
        }
    }

    /// Text suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Unauthorized(_) => "Your session has expired, please login again.".into(),
            ClientError::Validation(errors) => errors
                .iter()
                .next()
                .map(|(_, m)| m.to_string())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            ClientError::Connection(_) | ClientError::Timeout(_) => {
                "Unable to reach the clinic server. Check your connection.".into()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// Per-field messages carried by this error, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Validation(errors) => Some(errors),
            ClientError::Api { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }
}

/// Pull a headline message and field errors out of a backend error body.
///
/// Handles `{"message": ..}`, `{"error": ..}`, `{"detail": ..}`,
/// `{"errors": {field: [..]}}` and bare `{field: [..]}` bodies.
fn extract_error(body: &Value) -> (Option<String>, FieldErrors) {
    let mut field_errors = FieldErrors::new();
    let Some(obj) = body.as_object() else {
        return (None, field_errors);
    };

    let message = ["message", "error", "detail"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    if let Some(Value::Object(errors)) = obj.get("errors") {
        collect_field_errors(errors.iter(), &mut field_errors);
    }
    collect_field_errors(
        obj.iter().filter(|(k, _)| !ENVELOPE_KEYS.contains(&k.as_str())),
        &mut field_errors,
    );

    (message, field_errors)
}

fn collect_field_errors<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
    out: &mut FieldErrors,
) {
    for (field, value) in entries {
        let message = match value {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
            _ => None,
        };
        if let Some(message) = message {
            out.add(field.clone(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("phone", "Phone is required");
        errors.add("phone", "Phone must be 10 digits");
        assert_eq!(errors.get("phone"), Some("Phone is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn field_errors_display_joins_sorted() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Name is required");
        errors.add("city", "City is required");
        assert_eq!(
            errors.to_string(),
            "city: City is required; name: Name is required"
        );
    }

    #[test]
    fn empty_field_errors_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn message_body_decoded() {
        let err = ClientError::from_response(404, r#"{"status":"error","message":"Trial not found"}"#);
        match err {
            ClientError::Api { status, message, .. } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Trial not found");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn drf_field_errors_decoded() {
        let body = r#"{"status":"error","message":"Invalid data","errors":{"completion_notes":["This field may not be blank."]}}"#;
        let err = ClientError::from_response(400, body);
        let fields = err.field_errors().unwrap();
        assert_eq!(
            fields.get("completion_notes"),
            Some("This field may not be blank.")
        );
        assert_eq!(err.user_message(), "Invalid data");
    }

    #[test]
    fn bare_field_errors_supply_message() {
        let err = ClientError::from_response(400, r#"{"phone_primary":["Enter valid number"]}"#);
        assert_eq!(err.user_message(), "Enter valid number");
    }

    #[test]
    fn unparseable_body_uses_generic_message() {
        let err = ClientError::from_response(500, "<html>Server Error</html>");
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn status_401_maps_to_unauthorized() {
        let err = ClientError::from_response(401, r#"{"status":401,"error":"Token is expired"}"#);
        match err {
            ClientError::Unauthorized(msg) => assert_eq!(msg, "Token is expired"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn connection_errors_have_friendly_message() {
        let err = ClientError::Connection("http://localhost:8000/api".into());
        assert!(err.user_message().contains("Unable to reach"));
    }
}
