//! Briefing API integration.
//!
//! This module provides the HTTP client, the path builders for every endpoint,
//! and the [`Transport`] seam the resource layer fetches through.

mod client;
mod endpoints;

#[cfg(test)]
pub use client::MockTransport;
pub use client::{ApiClient, ApiClientBuilder, Transport};
pub use endpoints::{DEFAULT_MIN_AMOUNT, Endpoint, StockFilter};
