//! ISS REST API endpoint constants and path resolution.

use crate::error::MoexError;
use crate::types::Market;

/// Base URL of the ALGOPACK information and statistics server.
pub const MOEX_BASE_URL: &str = "https://apim.moex.com/iss";

/// Board prefix for equities (TQBR).
pub const SHARES_BOARD: &str = "/engines/stock/markets/shares/boards/tqbr";

/// Board prefix for derivatives (RFUD).
pub const FUTURES_BOARD: &str = "/engines/futures/markets/forts/boards/rfud";

/// Futures open interest (FUTOI) endpoints. Futures only, so no market segment.
pub mod futoi {
    /// Open interest for all instruments.
    pub const ALL: &str = "/analyticalproducts/futoi/securities.json";

    /// Open interest for one instrument.
    pub fn ticker(ticker: &str) -> String {
        format!("/analyticalproducts/futoi/securities/{ticker}.json")
    }
}

/// Market-scoped endpoint families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketEndpoint<'a> {
    /// Today's trading statistics for every security on the board
    AllSecurities,
    /// Today's trading statistics for one security
    Security(&'a str),
    /// Candles for one security
    Candles(&'a str),
    /// Order book for one security
    OrderBook(&'a str),
    /// Trade ticks for one security
    Trades(&'a str),
}

/// Board prefix for a market. Only shares and futures have endpoints.
pub fn board_path(market: Option<Market>) -> Result<&'static str, MoexError> {
    match market {
        Some(Market::Shares) => Ok(SHARES_BOARD),
        Some(Market::Futures) => Ok(FUTURES_BOARD),
        Some(other) => Err(MoexError::UnknownMarket(other.to_string())),
        None => Err(MoexError::UnknownMarket("<none>".to_string())),
    }
}

/// Path (relative to the base URL) for a market-scoped endpoint.
pub fn market_path(market: Option<Market>, endpoint: MarketEndpoint<'_>) -> Result<String, MoexError> {
    let board = board_path(market)?;
    Ok(match endpoint {
        MarketEndpoint::AllSecurities => format!("{board}/securities.json"),
        MarketEndpoint::Security(ticker) => format!("{board}/securities/{ticker}.json"),
        MarketEndpoint::Candles(ticker) => format!("{board}/securities/{ticker}/candles.json"),
        MarketEndpoint::OrderBook(ticker) => format!("{board}/securities/{ticker}/orderbook.json"),
        MarketEndpoint::Trades(ticker) => format!("{board}/securities/{ticker}/trades.json"),
    })
}
