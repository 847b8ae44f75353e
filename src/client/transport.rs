//! HTTP transport
//!
//! [`HttpTransport`] is the seam between the authenticated client and the
//! network. [`ReqwestTransport`] is the production implementation; tests
//! substitute their own.

use crate::{Error, Result, config::NetworkSettings};
use reqwest::{
    Client, Method, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use url::Url;

/// A request issued through the authenticated client
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, or an absolute `http(s)` URL
    pub path: String,
    /// Per-request headers; an `Authorization` entry here wins over the
    /// client's default
    pub headers: HeaderMap,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// PATCH request
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a header
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a JSON body
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Set the `Authorization` header for this request only
    pub fn with_authorization(mut self, value: &str) -> Result<Self> {
        self.headers.insert(AUTHORIZATION, header_value(value)?);
        Ok(self)
    }

    /// Explicit `Authorization` header, if any
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// A buffered response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as text, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs network requests for the authenticated client
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    /// Send `request` to `url` and buffer the response, whatever its status
    async fn send(&self, url: Url, request: &ApiRequest) -> Result<ApiResponse>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client from the network settings
    pub fn new(network: &NetworkSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(network.user_agent.as_str())
            .timeout(network.request_timeout())
            .connect_timeout(network.connect_timeout())
            .build()
            .map_err(|e| {
                Error::internal_with_context(
                    format!("Failed to create HTTP client: {}", e),
                    "transport".to_string(),
                )
            })?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// The underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, url: Url, request: &ApiRequest) -> Result<ApiResponse> {
        tracing::debug!(method = %request.method, %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request to backend failed: {}", e);
            Error::Http(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Resolve a request path against the base URL
///
/// Paths are appended to the base (a leading `/` does not reset the base
/// path); absolute `http(s)` URLs are used as-is.
pub fn resolve_url(base: &Url, path: &str) -> Result<Url> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Ok(Url::parse(path)?);
    }

    let base = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return Ok(Url::parse(base)?);
    }

    Ok(Url::parse(&format!("{}/{}", base, path))?)
}

pub(crate) fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        Error::validation(
            "authorization".to_string(),
            "header value contains invalid characters".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    #[test]
    fn test_resolve_url_appends_to_base_path() {
        let base = Url::parse("http://api.local/v1/").unwrap();
        assert_eq!(
            resolve_url(&base, "/users").unwrap().as_str(),
            "http://api.local/v1/users"
        );
        assert_eq!(
            resolve_url(&base, "users?page=2").unwrap().as_str(),
            "http://api.local/v1/users?page=2"
        );
        assert_eq!(resolve_url(&base, "").unwrap().as_str(), "http://api.local/v1");
    }

    #[test]
    fn test_resolve_url_absolute() {
        let base = Url::parse("http://api.local").unwrap();
        assert_eq!(
            resolve_url(&base, "https://other.local/x").unwrap().as_str(),
            "https://other.local/x"
        );
    }

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::post("/items")
            .with_json(&serde_json::json!({ "name": "a" }))
            .unwrap()
            .with_authorization("Bearer abc")
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.authorization(), Some("Bearer abc"));
        assert!(request.body.is_some());
        assert!(ApiRequest::get("/").authorization().is_none());
    }

    #[test]
    fn test_invalid_authorization_rejected() {
        assert!(ApiRequest::get("/").with_authorization("Bearer a\nb").is_err());
    }

    #[test]
    fn test_response_helpers() {
        let response = ApiResponse::new(StatusCode::OK, br#"{"token":"x"}"#.to_vec());
        assert!(response.is_success());
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["token"], "x");
        assert_eq!(response.text(), r#"{"token":"x"}"#);
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("authorization", "Bearer t"))
            .and(body_json(serde_json::json!({ "a": 1 })))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(&NetworkSettings::default()).unwrap();
        let request = ApiRequest::post("/echo")
            .with_json(&serde_json::json!({ "a": 1 }))
            .unwrap()
            .with_authorization("Bearer t")
            .unwrap();
        let url = resolve_url(&Url::parse(&server.uri()).unwrap(), &request.path).unwrap();

        let response = transport.send(url, &request).await.unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.text(), "created");
    }

    #[tokio::test]
    async fn test_reqwest_transport_returns_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(&NetworkSettings::default()).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let response = transport.send(url, &ApiRequest::get("/")).await.unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.is_success());
    }
}
