//! Request core: builds requests, attaches the session token and turns every kind of
//! server answer (JSON, empty, plain text, HTML error pages) into one result shape.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
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

/// A fully built request, ready for the transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Failure below HTTP: no response was received
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Response handed back by a transport. The body is only read on demand so that
/// `204 No Content` never touches it.
#[async_trait(?Send)]
pub trait HttpResponse {
    fn status(&self) -> u16;

    fn status_text(&self) -> String;

    async fn text(&self) -> Result<String, TransportError>;
}

/// Something that can put a request on the wire
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<Box<dyn HttpResponse>, TransportError>;
}

/// Per-call options: method, body and header overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::Post)
    }

    pub fn put() -> Self {
        Self::with_method(Method::Put)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::Delete)
    }

    fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serialize `body` as the JSON request body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let encoded = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(encoded);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP client bound to a base URL, a transport and a session store
#[derive(Clone)]
pub struct HttpClient {
    config: ApiConfig,
    transport: Rc<dyn Transport>,
    session: Rc<dyn SessionStore>,
}

impl HttpClient {
    pub fn new(config: ApiConfig, transport: Rc<dyn Transport>, session: Rc<dyn SessionStore>) -> Self {
        Self {
            config,
            transport,
            session,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// Build the request for `endpoint`: JSON content type, caller overrides, then the
    /// bearer token when one is stored.
    pub fn build_request(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in options.headers {
            set_header(&mut headers, name, value);
        }
        if let Some(token) = self.session.token().filter(|token| !token.is_empty()) {
            set_header(&mut headers, "Authorization".to_string(), format!("Bearer {token}"));
        }

        HttpRequest {
            method: options.method,
            url: self.config.url(endpoint),
            headers,
            body: options.body,
        }
    }

    /// Issue a request and normalize the answer.
    ///
    /// `Ok(None)` is a `204 No Content`. Every other success is the parsed body
    /// (or `{ "message": <text> }` when the body was not JSON). Failures are
    /// [`ApiError::Network`] or [`ApiError::Http`] only.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Option<Value>, ApiError> {
        let request = self.build_request(endpoint, options);
        log::debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await.map_err(|err| {
            log::error!("Request to {endpoint} failed before a response: {err}");
            ApiError::Network
        })?;

        let status = response.status();
        if status == 204 {
            return Ok(None);
        }

        let text = response.text().await.map_err(|err| {
            log::error!("Could not read response body from {endpoint}: {err}");
            ApiError::Network
        })?;

        normalize_response(status, &response.status_text(), &text).map(Some)
    }

    /// Like [`HttpClient::request`], decoding a successful body into `T`
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, ApiError> {
        match self.request(endpoint, options).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| ApiError::Decode(err.to_string())),
            None => Ok(None),
        }
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
    headers.push((name, value));
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turn a raw body into structured data.
///
/// Empty bodies become `{}` on success and `{ "message": "Error <status>: <text>" }`
/// on failure. Bodies that are not JSON become `{ "message": <body> }`.
pub fn parse_body(status: u16, status_text: &str, text: &str) -> Value {
    if text.is_empty() {
        if is_success(status) {
            return Value::Object(Map::new());
        }
        return json!({ "message": status_line(status, status_text) });
    }

    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => {
            log::warn!("Non-JSON response from server: {text}");
            json!({ "message": text })
        }
    }
}

/// Message for a failed response: `message`, then `error`, then a generic one
pub fn error_message(status: u16, data: &Value) -> String {
    message_field(data, "message")
        .or_else(|| message_field(data, "error"))
        .unwrap_or_else(|| format!("An error occurred ({status})"))
}

/// Parse `text` and fail with [`ApiError::Http`] unless `status` is 2xx
pub fn normalize_response(status: u16, status_text: &str, text: &str) -> Result<Value, ApiError> {
    let data = parse_body(status, status_text, text);
    if is_success(status) {
        Ok(data)
    } else {
        Err(ApiError::Http {
            status,
            message: error_message(status, &data),
        })
    }
}

fn status_line(status: u16, status_text: &str) -> String {
    format!("Error {status}: {status_text}").trim_end().to_string()
}

fn message_field(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::String(_) | Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeTransport;
    use super::*;
    use crate::session::MemorySessionStore;

    fn client(transport: Rc<FakeTransport>, session: Rc<MemorySessionStore>) -> HttpClient {
        HttpClient::new(ApiConfig::with_base_url("http://api.test"), transport, session)
    }

    #[test]
    fn test_build_request_without_token() {
        let http = client(Rc::new(FakeTransport::new()), Rc::new(MemorySessionStore::new()));
        let request = http.build_request("/api/transactions", RequestOptions::get());

        assert_eq!(request.url, "http://api.test/api/transactions");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_build_request_attaches_bearer_token() {
        let http = client(
            Rc::new(FakeTransport::new()),
            Rc::new(MemorySessionStore::with_token("secret")),
        );
        let request = http.build_request(
            "/api/transactions",
            RequestOptions::post()
                .header("Content-Type", "text/plain")
                .header("Authorization", "Basic nope"),
        );

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.header("Content-Type"), Some("text/plain"));
        assert_eq!(request.header("Authorization"), Some("Bearer secret"));
        assert_eq!(request.headers.len(), 2);
    }

    #[test]
    fn test_error_message_priority() {
        let both = json!({ "message": "Bad title", "error": "Bad Request" });
        assert_eq!(error_message(400, &both), "Bad title");

        let only_error = json!({ "error": "Unauthorized" });
        assert_eq!(error_message(401, &only_error), "Unauthorized");

        let empty_message = json!({ "message": "", "error": "Conflict" });
        assert_eq!(error_message(409, &empty_message), "Conflict");

        let zero_message = json!({ "message": 0, "error": "Bad input" });
        assert_eq!(error_message(400, &zero_message), "Bad input");

        let numeric_message = json!({ "message": 42 });
        assert_eq!(error_message(400, &numeric_message), "42");

        assert_eq!(error_message(502, &json!({})), "An error occurred (502)");
        assert_eq!(error_message(500, &json!(["x"])), "An error occurred (500)");
    }

    #[test]
    fn test_json_message_wins_regardless_of_shape() {
        let body = r#"{"message":"Username already exists","status":409,"details":{"field":"username"}}"#;
        let err = normalize_response(409, "Conflict", body).unwrap_err();
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[test]
    fn test_zero_message_falls_through_to_error() {
        let err = normalize_response(400, "Bad Request", r#"{"message":0,"error":"Bad input"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Bad input");
    }

    #[test]
    fn test_plain_text_error_body_is_surfaced() {
        let err = normalize_response(500, "Internal Server Error", "Internal Server Error").unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: "Internal Server Error".to_string()
            }
        );
    }

    #[test]
    fn test_html_error_page_is_surfaced_as_text() {
        let page = "<html><body>Bad Gateway</body></html>";
        let err = normalize_response(502, "Bad Gateway", page).unwrap_err();
        assert_eq!(err.to_string(), page);
    }

    #[test]
    fn test_empty_error_body_uses_status_line() {
        let err = normalize_response(503, "Service Unavailable", "").unwrap_err();
        assert_eq!(err.to_string(), "Error 503: Service Unavailable");

        let err = normalize_response(500, "", "").unwrap_err();
        assert_eq!(err.to_string(), "Error 500:");
    }

    #[test]
    fn test_non_json_success_body_is_wrapped() {
        let data = normalize_response(200, "OK", "created").unwrap();
        assert_eq!(data, json!({ "message": "created" }));

        let data = normalize_response(200, "OK", "").unwrap();
        assert_eq!(data, json!({}));
    }

    #[tokio::test]
    async fn test_no_content_short_circuits() {
        let transport = Rc::new(FakeTransport::new().respond(204, "No Content", "not json at all"));
        let http = client(transport.clone(), Rc::new(MemorySessionStore::new()));

        let result = http.request("/api/transactions/4", RequestOptions::delete()).await;

        assert_eq!(result, Ok(None));
        assert_eq!(transport.body_reads(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_network_error() {
        let transport = Rc::new(FakeTransport::new().fail("connection refused"));
        let http = client(transport, Rc::new(MemorySessionStore::new()));

        let err = http.request("/api/dashboard", RequestOptions::get()).await.unwrap_err();

        assert_eq!(err, ApiError::Network);
        assert!(!err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_request_sends_built_request() {
        let transport = Rc::new(FakeTransport::new().respond(200, "OK", r#"{"data":[]}"#));
        let http = client(transport.clone(), Rc::new(MemorySessionStore::with_token("t0k")));

        let options = RequestOptions::post().json(&json!({ "title": "Rent" })).unwrap();
        let data = http.request("/api/transactions", options).await.unwrap();

        assert_eq!(data, Some(json!({ "data": [] })));
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"title":"Rent"}"#));
        assert_eq!(sent[0].header("Authorization"), Some("Bearer t0k"));
    }

    #[tokio::test]
    async fn test_request_json_reports_shape_mismatch() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Expected {
            token: String,
        }

        let transport = Rc::new(FakeTransport::new().respond(200, "OK", r#"{"unexpected":true}"#));
        let http = client(transport, Rc::new(MemorySessionStore::new()));

        let result = http.request_json::<Expected>("/auth/signin", RequestOptions::post()).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
