//! Error types for the resolver module.

use thiserror::Error;

/// Errors that can occur while resolving a place name.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The HTTP request itself failed (network, timeout, client setup).
    #[error("Backend request failed: {0}")]
    Http(String),

    /// The backend answered with a non-success status and a reason.
    #[error("Backend rejected query (HTTP {status}): {reason}")]
    Rejected { status: u16, reason: String },

    /// The backend's response body could not be decoded.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// The query was blank after trimming.
    #[error("Ancient place name must not be empty")]
    EmptyQuery,
}
