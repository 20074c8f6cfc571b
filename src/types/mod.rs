//! Common types used across the MOEX client library.

pub mod datetime;
pub mod market;
pub mod table;
pub mod timeframe;

pub use datetime::{MOSCOW_OFFSET, moscow_now, moscow_today, parse_iss_datetime};
pub use market::{Market, board_market, dataname_to_market_symbol, futures_contract_on};
pub use table::{Dataset, IssResponse, Row};
pub use timeframe::{Timeframe, moex_interval_to_timeframe, timeframe_to_moex_interval};
