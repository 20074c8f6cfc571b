//! Example: Full daily candle history of a ticker.
//!
//! Run with: cargo run --example bars
//!
//! The token is read from `MOEX_TOKEN` (or `.env`) and saved to the OS
//! credential store when the `keyring` feature is enabled.

use moex_api_client::MoexClient;
use moex_api_client::types::{MOSCOW_OFFSET, Timeframe, dataname_to_market_symbol, moscow_now};
use time::macros::{datetime, format_description};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::OffsetTime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    let timer = OffsetTime::new(
        MOSCOW_OFFSET,
        format_description!("[day].[month].[year] [hour]:[minute]:[second]"),
    );
    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut builder = MoexClient::builder();
    if let Ok(token) = std::env::var("MOEX_TOKEN") {
        builder = builder.token(token);
    }
    let client = builder.build();

    let dataname = "TQBR.SBER";
    let timeframe: Timeframe = "D1".parse()?;

    let (market, symbol) = dataname_to_market_symbol(dataname);
    let Some(bars) = client
        .get_candles(market, &symbol, datetime!(1990-01-01 0:00), moscow_now(), timeframe)
        .await
    else {
        info!("No bars received");
        return Ok(());
    };

    let candles = bars.dataset("candles").ok_or("no candles dataset")?;
    let cols = candles.column_map();
    info!("Bars received: {}", candles.len());
    for bar in &candles.data {
        info!(
            "{} O:{} H:{} L:{} C:{} V:{}",
            bar[cols["begin"]], bar[cols["open"]], bar[cols["high"]], bar[cols["low"]],
            bar[cols["close"]], bar[cols["volume"]]
        );
    }

    Ok(())
}
