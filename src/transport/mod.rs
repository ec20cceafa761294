//! Transport layer shared by the service clients.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - Ordered query parameters ([`QueryParams`])
//! - The transport capability ([`Transport`]) and its implementations:
//!   live ([`ReqwestTransport`]) and offline ([`StubTransport`])
//! - Endpoint building ([`endpoint`]) and response classification
//!   ([`classify`], [`exchange`])

mod client;
mod envelope;
mod error;
mod http;
mod query;
mod stub;

#[cfg(test)]
mod http_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::ReqwestTransport;
pub use envelope::{classify, exchange};
pub use error::TransportError;
pub use self::http::{HttpRequest, HttpResponse, Transport, endpoint};
pub use query::QueryParams;
pub use stub::StubTransport;
