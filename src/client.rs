//! ClickUp REST client
//!
//! Every operation funnels through [`ClickUpClient::dispatch`], which:
//! - resolves the API token at call time,
//! - joins the base URL with an API-relative path and its query pairs,
//! - sends exactly one request through the configured [`Transport`],
//! - turns the reply into a JSON value or a descriptive [`ServiceError`].

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClickUpConfig;
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query parameters. Scalars occupy a key once, lists repeat it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single value, replacing anything previously stored under `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    pub fn set_opt<V: Into<String>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Appends one `key=value` pair per element.
    pub fn append_all<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.pairs.push((key.to_string(), value.into()));
        }
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Percent-encodes a value used as a single path segment (tag names).
pub fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub url: String,
    pub query: Query,
    pub token: String,
    pub body: Option<String>,
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Blocking wire seam below the client. Non-2xx replies are returned as
/// responses, only failures to get a reply at all are errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> ServiceResult<HttpResponse>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> ServiceResult<HttpResponse> {
        let call = self
            .agent
            .request(request.method.as_str(), &request.url)
            .set("Authorization", &request.token)
            .set("Content-Type", "application/json");

        let result = match &request.body {
            Some(body) => call.send_string(body),
            None => call.call(),
        };

        match result {
            Ok(response) => {
                let status = response.status();
                let body = response.into_string().map_err(|e| {
                    ServiceError::Network(format!("Failed to read response: {e}"))
                })?;
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Status(status, response)) => Ok(HttpResponse {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(err)) => Err(ServiceError::Network(err.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct ClickUpClient {
    config: Arc<ClickUpConfig>,
    transport: Arc<dyn Transport>,
}

impl ClickUpClient {
    pub fn new(config: ClickUpConfig) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(config: ClickUpConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Assembles the outbound request. Fails before anything is sent when
    /// no token is configured.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&Query>,
    ) -> ServiceResult<HttpRequest> {
        let token = self.config.token()?.to_string();

        let query = query.cloned().unwrap_or_default();
        let mut url = format!("{}{}", self.config.base_url(), path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }

        let body = body.map(serde_json::to_string).transpose()?;

        Ok(HttpRequest {
            method,
            path: path.to_string(),
            url,
            query,
            token,
            body,
        })
    }

    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&Query>,
    ) -> ServiceResult<Value> {
        let request = self.build_request(method, path, body, query)?;
        debug!(method = %method, path, "dispatching ClickUp request");

        let transport = Arc::clone(&self.transport);
        let response = tokio::task::spawn_blocking(move || transport.send(&request))
            .await
            .map_err(|e| ServiceError::Join(e.to_string()))??;

        interpret_response(method, path, response)
    }

    pub async fn get(&self, path: &str, query: Option<&Query>) -> ServiceResult<Value> {
        self.dispatch(Method::Get, path, None, query).await
    }

    pub async fn post(&self, path: &str, body: Option<&Value>) -> ServiceResult<Value> {
        self.dispatch(Method::Post, path, body, None).await
    }

    pub async fn put(&self, path: &str, body: Option<&Value>) -> ServiceResult<Value> {
        self.dispatch(Method::Put, path, body, None).await
    }

    pub async fn delete(&self, path: &str, query: Option<&Query>) -> ServiceResult<Value> {
        self.dispatch(Method::Delete, path, None, query).await
    }
}

fn interpret_response(method: Method, path: &str, response: HttpResponse) -> ServiceResult<Value> {
    if !(200..300).contains(&response.status) {
        warn!(method = %method, path, status = response.status, "ClickUp request failed");
        return Err(ServiceError::Upstream {
            method,
            path: path.to_string(),
            status: response.status,
            body: response.body,
        });
    }

    // delete endpoints answer with an empty body
    if response.body.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(&response.body)?)
}
