use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use serde_json::Value;

use super::{ApiRequest, Method, Transport, Upload};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::TokenStore;

/// Blocking HTTP transport for the clinic REST API.
///
/// Attaches `Authorization: Bearer <token>` when a token is stored and
/// clears the token whenever the backend answers 401.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    tokens: Arc<dyn TokenStore>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs: config.timeout_secs,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() {
            ClientError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else {
            ClientError::HttpClient(e.to_string())
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn multipart_form(upload: &Upload) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for (name, value) in &upload.fields {
        form = form.text(name.clone(), value.clone());
    }
    let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
    if let Some(mime) = &upload.content_type {
        part = part
            .mime_str(mime)
            .map_err(|e| ClientError::HttpClient(format!("invalid content type {mime}: {e}")))?;
    }
    Ok(form.part(upload.file_field.clone(), part))
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = self.url(&request.path);
        let request_id = uuid::Uuid::new_v4();

        let mut builder = self
            .client
            .request(to_reqwest(request.method), &url)
            .header("X-Request-Id", request_id.to_string());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let token = self.tokens.token();
        if let Some(token) = &token {
            builder = builder.bearer_auth(token.as_str());
        }

        if let Some(upload) = &request.upload {
            builder = builder.multipart(multipart_form(upload)?);
        } else if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            %request_id,
            has_token = token.is_some(),
            "Sending API request"
        );

        let response = builder.send().map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ClientError::ResponseParsing(e.to_string()))?;

        if !status.is_success() {
            let err = ClientError::from_response(status.as_u16(), &body);
            if status == reqwest::StatusCode::UNAUTHORIZED {
                tracing::warn!(path = %request.path, "Unauthorized response, clearing session token");
                if let Err(e) = self.tokens.clear() {
                    tracing::warn!(error = %e, "Failed to clear session token");
                }
            } else {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    status = status.as_u16(),
                    "API request failed"
                );
            }
            return Err(err);
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| ClientError::ResponseParsing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};

    /// Serve `router` on an ephemeral port from a background runtime.
    fn spawn_server(router: Router) -> String {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, router).await.unwrap();
            });
        });
        let addr = rx.recv().unwrap();
        format!("http://{addr}/api")
    }

    fn transport(base_url: &str, tokens: Arc<dyn TokenStore>) -> HttpTransport {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            session_file: None,
        };
        HttpTransport::new(&config, tokens).unwrap()
    }

    async fn echo_auth(headers: HeaderMap) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let has_request_id = headers.contains_key("x-request-id");
        Json(serde_json::json!({ "auth": auth, "request_id": has_request_id }))
    }

    #[test]
    fn attaches_bearer_token() {
        let base = spawn_server(Router::new().route("/api/echo/", get(echo_auth)));
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("tok-1"));
        let http = transport(&base, tokens);

        let body = http.send(ApiRequest::get("echo/")).unwrap();
        assert_eq!(body["auth"], "Bearer tok-1");
        assert_eq!(body["request_id"], true);
    }

    #[test]
    fn omits_header_without_token() {
        let base = spawn_server(Router::new().route("/api/echo/", get(echo_auth)));
        let http = transport(&base, Arc::new(MemoryTokenStore::new()));

        let body = http.send(ApiRequest::get("/echo/")).unwrap();
        assert!(body["auth"].is_null());
    }

    #[test]
    fn unauthorized_clears_token() {
        let router = Router::new().route(
            "/api/secure/",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({"status": 401, "error": "Token is expired"})),
                )
            }),
        );
        let base = spawn_server(router);
        let tokens = Arc::new(MemoryTokenStore::with_token("old"));
        let http = transport(&base, tokens.clone());

        let err = http.send(ApiRequest::get("secure/")).unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Token is expired"));
        assert!(!tokens.has_token());
    }

    #[test]
    fn error_status_decoded() {
        let router = Router::new().route(
            "/api/fail/",
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({"status": "error", "message": "Trial not found"})),
                )
            }),
        );
        let base = spawn_server(router);
        let tokens = Arc::new(MemoryTokenStore::with_token("keep"));
        let http = transport(&base, tokens.clone());

        let err = http
            .send(ApiRequest::post("fail/").json(&serde_json::json!({})).unwrap())
            .unwrap_err();
        assert_eq!(err.user_message(), "Trial not found");
        // Only 401 clears the session
        assert!(tokens.has_token());
    }

    #[test]
    fn json_body_and_query_forwarded() {
        let router = Router::new().route(
            "/api/items/",
            post(
                |axum::extract::Query(q): axum::extract::Query<std::collections::HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    Json(serde_json::json!({"page": q.get("page"), "name": body["name"]}))
                },
            ),
        );
        let base = spawn_server(router);
        let http = transport(&base, Arc::new(MemoryTokenStore::new()));

        let req = ApiRequest::post("items/")
            .query("page", 3)
            .json(&serde_json::json!({"name": "Receiver"}))
            .unwrap();
        let body = http.send(req).unwrap();
        assert_eq!(body["page"], "3");
        assert_eq!(body["name"], "Receiver");
    }

    #[test]
    fn multipart_upload_forwarded() {
        let router = Router::new().route(
            "/api/upload/",
            post(|mut form: axum::extract::Multipart| async move {
                let mut seen = serde_json::Map::new();
                while let Some(field) = form.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await.unwrap();
                    let value = match file_name {
                        Some(file_name) => serde_json::json!({"file_name": file_name, "len": bytes.len()}),
                        None => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
                    };
                    seen.insert(name, value);
                }
                Json(Value::Object(seen))
            }),
        );
        let base = spawn_server(router);
        let http = transport(&base, Arc::new(MemoryTokenStore::new()));

        let upload = Upload {
            fields: vec![("patient_visit".into(), "31".into()), ("file_type".into(), "PTA".into())],
            file_field: "file".into(),
            file_name: "pta.pdf".into(),
            content_type: Some("application/pdf".into()),
            bytes: vec![7; 64],
        };
        let body = http.send(ApiRequest::post("upload/").multipart(upload)).unwrap();
        assert_eq!(body["patient_visit"], "31");
        assert_eq!(body["file_type"], "PTA");
        assert_eq!(body["file"]["file_name"], "pta.pdf");
        assert_eq!(body["file"]["len"], 64);
    }

    #[test]
    fn empty_body_is_null() {
        let router = Router::new().route("/api/empty/", post(|| async { StatusCode::NO_CONTENT }));
        let base = spawn_server(router);
        let http = transport(&base, Arc::new(MemoryTokenStore::new()));
        assert_eq!(http.send(ApiRequest::post("empty/")).unwrap(), Value::Null);
    }

    #[test]
    fn unreachable_server_is_connection_error() {
        // Port 9 (discard) on loopback is not expected to accept connections.
        let http = transport("http://127.0.0.1:9/api", Arc::new(MemoryTokenStore::new()));
        let err = http.send(ApiRequest::get("x/")).unwrap_err();
        assert!(matches!(err, ClientError::Connection(_) | ClientError::HttpClient(_)));
    }

    #[test]
    fn trims_trailing_slash() {
        let http = transport("http://localhost:8000/api/", Arc::new(MemoryTokenStore::new()));
        assert_eq!(http.base_url(), "http://localhost:8000/api");
        assert_eq!(http.url("/clinical/trials/"), "http://localhost:8000/api/clinical/trials/");
    }
}
