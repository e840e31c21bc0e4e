//! HTTP client abstraction for testability

use super::error::ResolverError;
use std::future::Future;
use std::time::Duration;

/// An HTTP response: status code plus raw body.
///
/// The status is preserved because the backend reports rejection reasons in
/// the body of non-success responses.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for asynchronous HTTP operations.
///
/// This abstraction allows for dependency injection and easier testing by
/// enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, ResolverError>> + Send;

    /// Performs an async HTTP POST request with a JSON body.
    fn post_json(
        &self,
        url: &str,
        json_body: &str,
    ) -> impl Future<Output = Result<HttpResponse, ResolverError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ResolverError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResolverError::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, ResolverError> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ResolverError::Http(format!("Failed to read response: {}", e)))?
            .to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ResolverError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResolverError::Http(format!("Request failed: {}", e)))?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<HttpResponse, ResolverError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(json_body.to_string())
            .send()
            .await
            .map_err(|e| ResolverError::Http(format!("POST request failed: {}", e)))?;
        Self::read(response).await
    }
}
