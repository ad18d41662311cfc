//! Request transport seam.
//!
//! Services build an [`ApiRequest`] and hand it to a [`Transport`].
//! `HttpTransport` talks to the real backend; `MockTransport` replays
//! scripted responses in tests.

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multipart form carrying text fields and a single file part.
#[derive(Clone, PartialEq)]
pub struct Upload {
    pub fields: Vec<(String, String)>,
    pub file_field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("fields", &self.fields)
            .field("file_field", &self.file_field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One REST call, relative to the API base URL.
///
/// A request carries either a JSON `body` or a multipart `upload`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub upload: Option<Upload>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            upload: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when `value` is present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        let value =
            serde_json::to_value(body).map_err(|e| ClientError::HttpClient(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Send `upload` as `multipart/form-data` instead of JSON.
    pub fn multipart(mut self, upload: Upload) -> Self {
        self.body = None;
        self.upload = Some(upload);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Executes requests against the clinic backend.
///
/// Implementations return the decoded JSON body of a successful
/// response (`Value::Null` for empty bodies) and map every failure
/// to a [`ClientError`].
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

/// Send a request and decode the body into `T`.
///
/// An empty body (`204 No Content`) decodes as `{}`.
pub fn send_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<T, ClientError> {
    let method = request.method;
    let path = request.path.clone();
    let value = match transport.send(request)? {
        Value::Null => Value::Object(serde_json::Map::new()),
        value => value,
    };
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(%method, path = %path, error = %e, "Unexpected response shape");
        ClientError::ResponseParsing(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_opt_skips_none() {
        let req = ApiRequest::get("x/")
            .query("page", 2)
            .query_opt("search", None::<&str>)
            .query_opt("service_type", Some("Audiology"));
        assert_eq!(req.query.len(), 2);
        assert_eq!(req.query_value("page"), Some("2"));
        assert_eq!(req.query_value("service_type"), Some("Audiology"));
        assert_eq!(req.query_value("search"), None);
    }

    #[test]
    fn empty_body_decodes_as_ack() {
        let mock = MockTransport::new().respond(Method::Delete, "x/1/", Value::Null);
        let ack: crate::models::Ack = send_json(&mock, ApiRequest::delete("x/1/")).unwrap();
        assert!(ack.message.is_none());
    }

    #[test]
    fn json_body_attached() {
        let req = ApiRequest::post("x/")
            .json(&serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(req.body.unwrap()["a"], 1);
    }

    #[test]
    fn multipart_replaces_json_and_debug_omits_bytes() {
        let upload = Upload {
            fields: vec![("file_type".into(), "PTA".into())],
            file_field: "file".into(),
            file_name: "pta.pdf".into(),
            content_type: Some("application/pdf".into()),
            bytes: b"%PDF-1.7 private".to_vec(),
        };
        let req = ApiRequest::post("x/")
            .json(&serde_json::json!({"a": 1}))
            .unwrap()
            .multipart(upload);
        assert!(req.body.is_none());
        let printed = format!("{req:?}");
        assert!(printed.contains("pta.pdf"));
        assert!(printed.contains("len: 16"));
        assert!(!printed.contains("private"));
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
