//! HTTP plumbing for the FitCheck backend
//!
//! This module provides the request/response types, the client
//! configuration and a thin reqwest wrapper. It knows nothing about
//! individual endpoints; [`crate::api`] maps responses onto [`crate::ApiError`].

use crate::types::ImageUpload;
use reqwest::multipart::{Form, Part};
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Base URL baked in at build time, falling back to a local backend
pub const DEFAULT_BASE_URL: &str = match option_env!("FITCHECK_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

// =============================================================================
// Request Types
// =============================================================================

/// HTTP method used by the backend contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// DELETE request
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Value of one multipart field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Plain text field
    Text(String),
    /// File field
    File(ImageUpload),
}

/// One multipart field
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: FieldValue,
}

/// Request body encodings used by the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `application/json`, already serialized
    Json(Vec<u8>),
    /// `multipart/form-data`
    Multipart(Vec<MultipartField>),
}

/// A request to one backend endpoint
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base URL (e.g., "/items")
    pub path: String,
    /// Bearer token for the Authorization header
    pub bearer: Option<String>,
    /// Extra request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            headers: HashMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Create a POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Create a DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Authenticate with a bearer token
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a url-encoded form field
    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self.body {
            RequestBody::Form(fields) => fields.push((key.into(), value.into())),
            body => *body = RequestBody::Form(vec![(key.into(), value.into())]),
        }
        self
    }

    /// Set the request body from JSON
    pub fn json_body<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = RequestBody::Json(serde_json::to_vec(value)?);
        Ok(self)
    }

    /// Append a multipart text field
    pub fn text_part(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.part(name.into(), FieldValue::Text(value.into()))
    }

    /// Append a multipart file field
    pub fn file_part(self, name: impl Into<String>, image: ImageUpload) -> Self {
        self.part(name.into(), FieldValue::File(image))
    }

    fn part(mut self, name: String, value: FieldValue) -> Self {
        let field = MultipartField { name, value };
        match &mut self.body {
            RequestBody::Multipart(fields) => fields.push(field),
            body => *body = RequestBody::Multipart(vec![field]),
        }
        self
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Raw backend response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body text
    pub body: String,
}

impl ApiResponse {
    /// Create a new response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, headers: HashMap::new(), body: body.into() }
    }

    /// Check if the response is successful (2xx status)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the backend rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Get a header value
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }

    /// Deserialize the body
    pub fn json<T>(&self) -> Result<T, serde_json::Error>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        serde_json::from_str(&self.body)
    }

    /// Message the server put in an error body, if any
    ///
    /// Handler failures use `{"error": ...}`; framework errors use
    /// `{"detail": ...}`, where validation failures carry a list of
    /// `{"msg": ...}` entries.
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;

        ["error", "detail", "message"]
            .iter()
            .filter_map(|key| value.get(key))
            .find_map(|field| match field {
                serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                serde_json::Value::Array(entries) => entries
                    .first()
                    .and_then(|e| e.get("msg"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string),
                _ => None,
            })
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://api.fitcheck.app")
    pub base_url: String,
    /// Request timeout; outfit generation routinely takes tens of seconds
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: format!("FitCheck/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Full URL for an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// reqwest wrapper that executes [`ApiRequest`]s
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Execute a request
    ///
    /// Any HTTP status is a successful send; only transport failures error.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, reqwest::Error> {
        let url = self.config.endpoint(&request.path);
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");

        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        if let Some(token) = &request.bearer {
            req = req.bearer_auth(token);
        }

        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Form(fields) => req.form(&fields),
            RequestBody::Json(bytes) => req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes),
            RequestBody::Multipart(fields) => req.multipart(build_form(fields)?),
        };

        let response = req.send().await?;
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.to_string(), value_str.to_string());
            }
        }

        let body = response.text().await?;
        tracing::debug!(path = %request.path, status, "received response");

        Ok(ApiResponse { status, headers, body })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

fn build_form(fields: Vec<MultipartField>) -> Result<Form, reqwest::Error> {
    let mut form = Form::new();
    for field in fields {
        form = match field.value {
            FieldValue::Text(text) => form.text(field.name, text),
            FieldValue::File(image) => {
                let part = Part::bytes(image.bytes)
                    .file_name(image.file_name)
                    .mime_str(&image.mime_type)?;
                form.part(field.name, part)
            }
        };
    }
    Ok(form)
}

// =============================================================================
// Tests
// =============================================================================
