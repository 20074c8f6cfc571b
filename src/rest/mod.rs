//! MOEX ISS REST API client.
//!
//! Provides typed access to the ALGOPACK market data and analytics endpoints.
//! Paginated endpoints are fetched completely and merged into one response.

mod analytics;
mod client;
pub mod endpoints;
mod market_data;
pub mod pagination;

pub use client::{MoexClient, MoexClientBuilder};
pub use endpoints::{MOEX_BASE_URL, MarketEndpoint, market_path};
pub use pagination::PageAccumulator;
