use async_trait::async_trait;
use reqwest::header;

use crate::error::Result;

/// HTTP verb for a [`TransportRequest`]. Only the two this crate issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single outbound request.
#[derive(Debug)]
pub struct TransportRequest<'a> {
    pub method: Method,
    pub url: &'a str,
    /// Pre-serialized JSON body, sent with `Content-Type: application/json`.
    pub json_body: Option<String>,
}

impl<'a> TransportRequest<'a> {
    pub fn get(url: &'a str) -> Self {
        Self {
            method: Method::Get,
            url,
            json_body: None,
        }
    }

    pub fn post_json(url: &'a str, body: String) -> Self {
        Self {
            method: Method::Post,
            url,
            json_body: Some(body),
        }
    }
}

/// Raw response: status code plus body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP seam shared by the geolocation lookup and payload
/// delivery, so either remote can be substituted in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `req` once and return the raw response. No retries and no
    /// deadline — callers impose those externally.
    async fn send(&self, req: TransportRequest<'_>) -> Result<TransportResponse>;
}

/// `reqwest`-backed transport. The inner client keeps one connection pool
/// shared across calls.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, req: TransportRequest<'_>) -> Result<TransportResponse> {
        let builder = match req.method {
            Method::Get => self.client.get(req.url),
            Method::Post => self.client.post(req.url),
        };
        let builder = match req.json_body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
