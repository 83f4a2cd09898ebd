// Request forwarder: one outbound call to the backend API per inbound request.
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::session::Credential;

/// One outbound request to the backend API. Constructed fresh per call and
/// immutable once handed to the forwarder.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    authenticated: bool,
    timeout: Option<Duration>,
}

impl ForwardRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            authenticated: false,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body (ignored for GET requests, matching the upstream contract)
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Mark the request as requiring a credential
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    /// Override the client-wide timeout for this call only
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Upstream-shaped failure: the status the adapter should respond with plus a
/// client-safe message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardError {
    pub status: u16,
    pub message: String,
}

impl ForwardError {
    pub fn unauthorized() -> Self {
        Self {
            status: 401,
            message: "Unauthorized".to_string(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Outcome of one forward call. Exactly one variant is ever populated;
/// callers must branch rather than assume success.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardResult<T> {
    Data(T),
    Error(ForwardError),
}

impl<T> ForwardResult<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, ForwardResult::Error(_))
    }
}

/// Issues a single HTTP call to the backend API on behalf of a server-side
/// caller, injecting the bearer token when requested and normalizing every
/// outcome into a [`ForwardResult`]. Never returns a Rust error and never
/// panics; the tagged result is the only channel back to the adapter.
///
/// No retries, no caching, no state outliving a single call.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    base_url: String,
}

impl Forwarder {
    /// Build a forwarder against a backend base URL (including the version
    /// prefix, e.g. `http://localhost:4050/api/v1`).
    pub fn new(base_url: &str, default_timeout: Duration) -> anyhow::Result<Self> {
        // Fail fast on a bad deployment value rather than per request
        Url::parse(base_url)?;

        let client = reqwest::Client::builder()
            .timeout(default_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn forward(
        &self,
        request: ForwardRequest,
        credential: Option<&Credential>,
    ) -> ForwardResult<Value> {
        // Short-circuit before any network activity when auth is required
        // but no credential exists
        let token = if request.authenticated {
            match credential {
                Some(cred) => Some(cred.access_token.clone()),
                None => return ForwardResult::Error(ForwardError::unauthorized()),
            }
        } else {
            None
        };

        let url = join_url(&self.base_url, &request.path);

        let mut builder = self.client.request(request.method.clone(), &url);

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            if request.method != Method::GET {
                builder = builder.json(body);
            }
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("forward {} {} failed: {}", request.method, url, e);
                return ForwardResult::Error(ForwardError::transport(transport_message(&e)));
            }
        };

        let status = response.status();

        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("forward {} {} body read failed: {}", request.method, url, e);
                return ForwardResult::Error(ForwardError::transport(
                    "failed to read upstream response",
                ));
            }
        };

        if !status.is_success() {
            let message = error_message(status, &bytes);
            return ForwardResult::Error(ForwardError::upstream(status.as_u16(), message));
        }

        // Tolerate empty success bodies (204-style responses)
        if bytes.is_empty() {
            return ForwardResult::Data(Value::Null);
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(parsed) => ForwardResult::Data(unwrap_envelope(parsed)),
            Err(e) => {
                tracing::warn!("forward {} {} returned invalid JSON: {}", request.method, url, e);
                ForwardResult::Error(ForwardError::transport("upstream returned invalid JSON"))
            }
        }
    }
}

/// Stable, client-safe descriptions per transport failure class. Identical
/// inputs against identical upstream behavior must yield identical results.
fn transport_message(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "upstream request timed out"
    } else if e.is_connect() {
        "unable to reach upstream API"
    } else {
        "upstream request failed"
    }
}

/// Pull the server-provided message out of an error body, falling back to the
/// status line when the body is empty or not JSON.
fn error_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(msg) = value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| value.get("error").and_then(Value::as_str))
        {
            return msg.to_string();
        }
    }

    format!(
        "HTTP {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    )
}

/// Backend responses are often wrapped in a `{"data": ...}` envelope; unwrap
/// one level so adapters always see the payload itself.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
