// ABOUTME: Axum HTTP testing utilities for integration tests
// ABOUTME: Drives the plan, media and health routers in-process through tower's oneshot

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, Response},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

/// Request under construction for a single in-process round trip
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
}

impl AxumTestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// GET request
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// POST request with an empty body
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    /// Set a request header
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(
            HeaderName::try_from(name).unwrap(),
            HeaderValue::try_from(value).unwrap(),
        );
        self
    }

    /// Serialize `data` as the JSON body
    pub fn json<T: Serialize>(self, data: &T) -> Self {
        let body = serde_json::to_vec(data).unwrap();
        let mut request = self.header(header::CONTENT_TYPE.as_str(), "application/json");
        request.body = Bytes::from(body);
        request
    }

    /// Body sent byte for byte, without a content type
    pub fn raw_body(mut self, body: &str) -> Self {
        self.body = Bytes::copy_from_slice(body.as_bytes());
        self
    }

    /// Run the request through `app` and buffer the whole response
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let mut request = Request::builder()
            .method(self.method)
            .uri(self.uri)
            .body(Body::from(self.body))
            .unwrap();
        *request.headers_mut() = self.headers;

        let response = app.oneshot(request).await.unwrap();
        AxumTestResponse::buffer(response).await
    }
}

/// Fully buffered response
pub struct AxumTestResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl AxumTestResponse {
    async fn buffer(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status.as_u16(),
            headers: parts.headers,
            body: to_bytes(body, usize::MAX).await.unwrap(),
        }
    }

    /// Status code
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Header value, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    /// Raw body, used for streamed audio
    pub fn bytes(self) -> Vec<u8> {
        self.body.to_vec()
    }

    /// Body decoded as JSON
    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }
}
