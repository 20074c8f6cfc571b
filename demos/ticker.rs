//! Example: Specification and last price for a list of tickers.
//!
//! Run with: cargo run --example ticker

use moex_api_client::MoexClient;
use moex_api_client::types::{
    MOSCOW_OFFSET, Market, dataname_to_market_symbol, futures_contract_on, moscow_today,
};
use time::macros::format_description;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::OffsetTime;

fn show(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    let timer = OffsetTime::new(
        MOSCOW_OFFSET,
        format_description!("[day].[month].[year] [hour]:[minute]:[second]"),
    );
    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("debug,reqwest=off,hyper_util=off")),
        )
        .init();

    let mut builder = MoexClient::builder();
    if let Ok(token) = std::env::var("MOEX_TOKEN") {
        builder = builder.token(token);
    }
    let client = builder.build();

    let today = moscow_today();
    let datanames = [
        "TQBR.SBER".to_string(),
        "TQBR.HYDR".to_string(),
        futures_contract_on("Si", today),
        futures_contract_on("RI", today),
        "SPBFUT.CNYRUBF".to_string(),
        "SPBFUT.IMOEXF".to_string(),
    ];

    for dataname in &datanames {
        let (market, symbol) = dataname_to_market_symbol(dataname);
        let Some(si) = client.get_ticker(market, &symbol).await else {
            warn!("No data for {dataname}");
            continue;
        };
        let (Some(securities), Some(marketdata)) = (si.dataset("securities"), si.dataset("marketdata"))
        else {
            warn!("Incomplete response for {dataname}");
            continue;
        };
        debug!("{si:?}");

        let field = |name: &str| securities.value(0, name).map(show).unwrap_or_default();
        let lot_column = if market == Some(Market::Shares) { "LOTSIZE" } else { "LOTVOLUME" };
        let market_name = market.map(|m| m.to_string()).unwrap_or_default();

        info!(
            "Ticker {}.{} ({}, {market_name})",
            field("BOARDID"),
            field("SECID"),
            field("SHORTNAME")
        );
        info!("- Lot: {}", field(lot_column));
        info!("- Price step: {}", field("MINSTEP"));
        info!("- Decimals: {}", field("DECIMALS"));
        info!(
            "- Last trade price: {}",
            marketdata.value(0, "LAST").map(show).unwrap_or_default()
        );
    }

    Ok(())
}
