//! Place name resolution client
//!
//! Consumes the resolution backend: a request/response API taking an ancient
//! place name and returning a [`crate::place::PlaceResult`] or a
//! human-readable failure reason. The map core never resolves names itself;
//! this module is the producer whose results the host appends to its search
//! session.
//!
//! [`fallback`] carries a small builtin gazetteer of famous ancient capitals
//! for offline use.

mod client;
mod error;
pub mod fallback;
mod http;

pub use client::PlaceResolver;
pub use error::ResolverError;
pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpResponse};
