use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::Value;

use super::{ApiRequest, Method, Transport};
use crate::error::{ClientError, FieldErrors};

type Scripted = Result<Value, ClientError>;

/// Mock transport for testing. Replays scripted responses per route
/// and records every request it receives.
///
/// Responses queued for the same method and path are returned in order;
/// the last one is repeated once the queue drains.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response.
    pub fn respond(self, method: Method, path: &str, body: Value) -> Self {
        self.push(method, path, Ok(body));
        self
    }

    /// Queue an error response.
    pub fn fail(self, method: Method, path: &str, error: ClientError) -> Self {
        self.push(method, path, Err(error));
        self
    }

    /// Queue a response on an already shared mock.
    pub fn push(&self, method: Method, path: &str, response: Scripted) {
        if let Ok(mut routes) = self.routes.lock() {
            routes
                .entry((method, path.to_string()))
                .or_default()
                .push_back(response);
        }
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Requests sent to `path` with `method`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().ok()?.last().cloned()
    }
}

/// Errors are not `Clone`; rebuild an equivalent one for repeated replies.
fn replay(error: &ClientError) -> ClientError {
    match error {
        ClientError::Connection(url) => ClientError::Connection(url.clone()),
        ClientError::Timeout(secs) => ClientError::Timeout(*secs),
        ClientError::HttpClient(m) => ClientError::HttpClient(m.clone()),
        ClientError::Unauthorized(m) => ClientError::Unauthorized(m.clone()),
        ClientError::Api {
            status,
            message,
            field_errors,
        } => ClientError::Api {
            status: *status,
            message: message.clone(),
            field_errors: field_errors.clone(),
        },
        ClientError::ResponseParsing(m) => ClientError::ResponseParsing(m.clone()),
        ClientError::Validation(f) => ClientError::Validation(f.clone()),
        ClientError::Config(m) => ClientError::Config(m.clone()),
        ClientError::Session(m) => ClientError::Session(m.clone()),
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let key = (request.method, request.path.clone());
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }

        let mut routes = self
            .routes
            .lock()
            .map_err(|_| ClientError::HttpClient("mock lock poisoned".into()))?;

        let Some(queue) = routes.get_mut(&key) else {
            return Err(ClientError::Api {
                status: 404,
                message: format!("no scripted response for {} {}", key.0, key.1),
                field_errors: FieldErrors::new(),
            });
        };

        if queue.len() > 1 {
            return queue
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::HttpClient("empty mock queue".into())));
        }

        match queue.front() {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(error)) => Err(replay(error)),
            None => Err(ClientError::HttpClient("empty mock queue".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replays_in_order_then_repeats_last() {
        let mock = MockTransport::new()
            .respond(Method::Get, "a/", json!(1))
            .respond(Method::Get, "a/", json!(2));

        assert_eq!(mock.send(ApiRequest::get("a/")).unwrap(), json!(1));
        assert_eq!(mock.send(ApiRequest::get("a/")).unwrap(), json!(2));
        assert_eq!(mock.send(ApiRequest::get("a/")).unwrap(), json!(2));
        assert_eq!(mock.request_count(), 3);
    }

    #[test]
    fn unscripted_route_is_404() {
        let mock = MockTransport::new();
        let err = mock.send(ApiRequest::post("missing/")).unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
        assert_eq!(mock.requests_to(Method::Post, "missing/").len(), 1);
    }

    #[test]
    fn scripted_errors_repeat() {
        let mock = MockTransport::new().fail(Method::Get, "x/", ClientError::Timeout(3));
        assert!(matches!(mock.send(ApiRequest::get("x/")), Err(ClientError::Timeout(3))));
        assert!(matches!(mock.send(ApiRequest::get("x/")), Err(ClientError::Timeout(3))));
    }
}
