//! Real-time market data endpoints for shares and futures.

use time::PrimitiveDateTime;

use crate::error::MoexError;
use crate::rest::MoexClient;
use crate::rest::endpoints::{MarketEndpoint, market_path};
use crate::types::{IssResponse, Market, Timeframe};

const NO_PARAMS: &[(&str, String)] = &[];

impl MoexClient {
    /// Today's trading statistics for every security of a market.
    ///
    /// Datasets: `securities`, `marketdata`. All pages of `securities` are merged.
    pub async fn try_get_all_tickers(
        &self,
        market: impl Into<Option<Market>>,
    ) -> Result<Option<IssResponse>, MoexError> {
        let endpoint = market_path(market.into(), MarketEndpoint::AllSecurities)?;
        self.paginate_offset(&endpoint, "securities", NO_PARAMS).await
    }

    /// Like [`try_get_all_tickers`](Self::try_get_all_tickers), logging failures as `None`.
    pub async fn get_all_tickers(&self, market: impl Into<Option<Market>>) -> Option<IssResponse> {
        let result = self.try_get_all_tickers(market).await;
        self.report("get_all_tickers", result)
    }

    /// Today's trading statistics for one security.
    ///
    /// Datasets: `securities` (specification) and `marketdata` (quotes).
    pub async fn try_get_ticker(
        &self,
        market: impl Into<Option<Market>>,
        ticker: &str,
    ) -> Result<Option<IssResponse>, MoexError> {
        let endpoint = market_path(market.into(), MarketEndpoint::Security(ticker))?;
        Ok(Some(self.get_json(&endpoint, NO_PARAMS).await?))
    }

    /// Like [`try_get_ticker`](Self::try_get_ticker), logging failures as `None`.
    pub async fn get_ticker(
        &self,
        market: impl Into<Option<Market>>,
        ticker: &str,
    ) -> Option<IssResponse> {
        let result = self.try_get_ticker(market, ticker).await;
        self.report("get_ticker", result)
    }

    /// Candles for one security over `[from, till)`.
    ///
    /// Dataset: `candles`. Requests are repeated until the window is covered.
    ///
    /// # Arguments
    ///
    /// * `from` - Start of the range, Moscow time
    /// * `till` - End of the range, Moscow time
    /// * `timeframe` - Candle period
    pub async fn try_get_candles(
        &self,
        market: impl Into<Option<Market>>,
        ticker: &str,
        from: PrimitiveDateTime,
        till: PrimitiveDateTime,
        timeframe: Timeframe,
    ) -> Result<Option<IssResponse>, MoexError> {
        let endpoint = market_path(market.into(), MarketEndpoint::Candles(ticker))?;
        self.paginate_window(&endpoint, "candles", from, till, timeframe.interval())
            .await
    }

    /// Like [`try_get_candles`](Self::try_get_candles), logging failures as `None`.
    pub async fn get_candles(
        &self,
        market: impl Into<Option<Market>>,
        ticker: &str,
        from: PrimitiveDateTime,
        till: PrimitiveDateTime,
        timeframe: Timeframe,
    ) -> Option<IssResponse> {
        let result = self
            .try_get_candles(market, ticker, from, till, timeframe)
            .await;
        self.report("get_candles", result)
    }

    /// Order book for one security.
    ///
    /// Dataset: `orderbook`.
    pub async fn try_get_orderbook(
        &self,
        market: impl Into<Option<Market>>,
        ticker: &str,
    ) -> Result<Option<IssResponse>, MoexError> {
        let endpoint = market_path(market.into(), MarketEndpoint::OrderBook(ticker))?;
        Ok(Some(self.get_json(&endpoint, NO_PARAMS).await?))
    }

    /// Like [`try_get_orderbook`](Self::try_get_orderbook), logging failures as `None`.
    pub async fn get_orderbook(
        &self,
        market: impl Into<Option<Market>>,
        ticker: &str,
    ) -> Option<IssResponse> {
        let result = self.try_get_orderbook(market, ticker).await;
        self.report("get_orderbook", result)
    }

    /// Trades of the current session for one security.
    ///
    /// Dataset: `trades`.
    ///
    /// # Arguments
    ///
    /// * `tradeno` - Only return trades starting from this trade number
    pub async fn try_get_trades(
        &self,
        market: impl Into<Option<Market>>,
        ticker: &str,
        tradeno: Option<u64>,
    ) -> Result<Option<IssResponse>, MoexError> {
        #[derive(serde::Serialize)]
        struct Params {
            #[serde(skip_serializing_if = "Option::is_none")]
            tradeno: Option<u64>,
        }
        let endpoint = market_path(market.into(), MarketEndpoint::Trades(ticker))?;
        Ok(Some(self.get_json(&endpoint, &Params { tradeno }).await?))
    }

    /// Like [`try_get_trades`](Self::try_get_trades), logging failures as `None`.
    pub async fn get_trades(
        &self,
        market: impl Into<Option<Market>>,
        ticker: &str,
        tradeno: Option<u64>,
    ) -> Option<IssResponse> {
        let result = self.try_get_trades(market, ticker, tradeno).await;
        self.report("get_trades", result)
    }
}
