//! In-memory transport for exercising operations without a network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::client::{ClickUpClient, HttpRequest, HttpResponse, Method, Transport};
use crate::config::{ClickUpConfig, DEFAULT_BASE_URL};
use crate::error::ServiceResult;

/// Serves canned responses per `(method, path)` and records every request.
/// Unrouted requests get `200 {}`.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<(Method, String), HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert((method, path.to_string()), HttpResponse::new(status, body));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> ServiceResult<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .routes
            .get(&(request.method, request.path.clone()))
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(200, "{}")))
    }
}

pub fn mock_client(transport: MockTransport) -> (ClickUpClient, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let config = ClickUpConfig::new(DEFAULT_BASE_URL, Some("pk_test".to_string()));
    let client = ClickUpClient::with_transport(config, transport.clone());
    (client, transport)
}

/// Parses the JSON body a request carried.
pub fn body_of(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().expect("request has no body")).unwrap()
}
