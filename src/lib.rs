//! # MOEX Client
//!
//! An async Rust client library for the Moscow Exchange ALGOPACK (ISS) REST API.
//!
//! ## Features
//!
//! - Securities, candles, order books, and trades for shares and futures
//! - Futures open interest (FUTOI) analytics
//! - Multi-page results fetched and merged into one table
//! - Bearer token persisted in parts in a secret store
//!
//! Responses keep the exchange's column-oriented layout (see [`types::IssResponse`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use moex_api_client::MoexClient;
//! use moex_api_client::types::{Timeframe, dataname_to_market_symbol};
//! use time::macros::datetime;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MoexClient::builder().token("<token>").build();
//!
//!     let (market, symbol) = dataname_to_market_symbol("TQBR.SBER");
//!     let timeframe: Timeframe = "D1".parse()?;
//!     let bars = client
//!         .try_get_candles(market, &symbol, datetime!(2024-01-01 0:00), datetime!(2024-07-01 0:00), timeframe)
//!         .await?;
//!     if let Some(candles) = bars.and_then(|b| b.into_dataset("candles")) {
//!         println!("Received {} bars", candles.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::MoexError;
pub use rest::MoexClient;
pub use types::{Dataset, IssResponse, Market, Timeframe};

/// Result type alias using MoexError
pub type Result<T> = std::result::Result<T, MoexError>;
