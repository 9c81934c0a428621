//! HTTP Request Invoker
//!
//! One synchronous request per call against `http://<host><uri>`, with a request
//! timeout. Transport failures and non-2xx responses come back as errors; decoding
//! the body is left to the caller.

use crate::config::HttpConfig;
use crate::error::DemoError;
use crate::process::parse_json;
use reqwest::blocking::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// A single HTTP call, built once and consumed by one [`HttpInvoker::call`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// `<host>:<port>`
    pub host: String,
    /// Path starting with `/`
    pub uri: String,
    pub headers: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
    /// JSON body; only sent on POST
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(host: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            host: host.into(),
            uri: uri.into(),
            headers: BTreeMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(host: impl Into<String>, uri: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: HttpMethod::Post,
            body,
            ..Self::get(host, uri)
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Target URL without the query string, as shown in diagnostics.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.host, self.uri)
    }

    /// Serialized request payload: never for GET; for POST the JSON body, or an
    /// empty body when there is none.
    pub fn payload(&self) -> Result<Option<String>, DemoError> {
        match (self.method, &self.body) {
            (HttpMethod::Get, _) => Ok(None),
            (HttpMethod::Post, None) => Ok(Some(String::new())),
            (HttpMethod::Post, Some(body)) => serde_json::to_string(body)
                .map(Some)
                .map_err(|e| DemoError::Usage(format!("Could not encode request body - {}", e))),
        }
    }
}

/// Status code and raw body of a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Decode the body as JSON.
    pub fn json(&self) -> Result<Value, DemoError> {
        parse_json(&self.body)
    }
}

/// Issues HTTP requests to the scheduler and state-service endpoints.
pub trait HttpInvoker {
    fn call(&self, request: &HttpRequest) -> Result<HttpResponse, DemoError>;
}

/// [`HttpInvoker`] backed by a blocking `reqwest` client.
pub struct ReqwestInvoker {
    client: Client,
}

impl ReqwestInvoker {
    pub fn new(timeout: Duration) -> Result<Self, DemoError> {
        // HTTP_PROXY / NO_PROXY from the environment apply
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DemoError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, DemoError> {
        Self::new(config.timeout())
    }
}

impl HttpInvoker for ReqwestInvoker {
    fn call(&self, request: &HttpRequest) -> Result<HttpResponse, DemoError> {
        let url = request.url();
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };
        let transport_error = |message: String| DemoError::Transport {
            method: request.method.to_string(),
            url: url.clone(),
            message,
        };

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(payload) = request.payload()? {
            if !payload.is_empty() && !has_header(request, "content-type") {
                builder = builder.header(reqwest::header::CONTENT_TYPE, "application/json");
            }
            builder = builder.body(payload);
        }

        debug!(method = %request.method, url = %url, query = ?request.query, "Sending request");
        let response = builder.send().map_err(|e| {
            warn!(method = %request.method, url = %url, error = %e, "Request failed");
            transport_error(e.to_string())
        })?;

        let status = response.status();
        let body = response.text();
        if !status.is_success() {
            warn!(method = %request.method, url = %url, status = status.as_u16(), "Error response");
            return Err(DemoError::HttpStatus {
                method: request.method.to_string(),
                url: url.clone(),
                status: status.as_u16(),
                message: format!("HTTP status {}", status),
                body: body.ok(),
            });
        }

        let body = body.map_err(|e| transport_error(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received response");
        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn has_header(request: &HttpRequest, name: &str) -> bool {
    request
        .headers
        .keys()
        .any(|key| key.eq_ignore_ascii_case(name))
}
