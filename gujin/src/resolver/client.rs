//! Resolution backend client.

use super::error::ResolverError;
use super::http::AsyncHttpClient;
use crate::config::BackendSettings;
use crate::place::PlaceResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    ancient_name: &'a str,
}

/// Error payload of a non-success backend response.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Client for the place name resolution API.
///
/// `POST {base}/api/query` with `{"ancient_name": ...}` returns a
/// [`PlaceResult`] on success or an error detail string otherwise.
pub struct PlaceResolver<C: AsyncHttpClient> {
    http: C,
    base_url: String,
}

impl<C: AsyncHttpClient> PlaceResolver<C> {
    pub fn new(http: C, settings: &BackendSettings) -> Self {
        Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves an ancient place name to its modern location.
    pub async fn resolve(&self, ancient_name: &str) -> Result<PlaceResult, ResolverError> {
        let name = ancient_name.trim();
        if name.is_empty() {
            return Err(ResolverError::EmptyQuery);
        }

        let url = format!("{}/api/query", self.base_url);
        let body = serde_json::to_string(&QueryRequest { ancient_name: name })
            .map_err(|e| ResolverError::Http(format!("Failed to encode request: {}", e)))?;

        debug!(ancient_name = name, "querying resolution backend");
        let response = self.http.post_json(&url, &body).await?;

        if !response.is_success() {
            let reason = serde_json::from_slice::<ErrorDetail>(&response.body)
                .map(|d| d.detail)
                .unwrap_or_else(|_| String::from_utf8_lossy(&response.body).into_owned());
            return Err(ResolverError::Rejected {
                status: response.status,
                reason,
            });
        }

        let result: PlaceResult = serde_json::from_slice(&response.body)
            .map_err(|e| ResolverError::InvalidResponse(e.to_string()))?;
        info!(
            ancient_name = %result.ancient_name,
            modern_name = %result.modern_name,
            "place resolved"
        );
        Ok(result)
    }

    /// Checks backend liveness via `GET {base}/api/health`.
    pub async fn health(&self) -> Result<(), ResolverError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.http.get(&url).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ResolverError::Rejected {
                status: response.status,
                reason: "health check failed".to_string(),
            })
        }
    }
}
