//! Markets, board codes, and dataset-name parsing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

use crate::error::MoexError;

/// Trading segment of the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Equities (board TQBR)
    Shares,
    /// Derivatives (board RFUD / SPBFUT)
    Futures,
    /// Currency market (board CETS). Recognized by name parsing only.
    Fx,
}

impl Market {
    /// The lowercase market code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Shares => "shares",
            Market::Futures => "futures",
            Market::Fx => "fx",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = MoexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shares" => Ok(Market::Shares),
            "futures" => Ok(Market::Futures),
            "fx" => Ok(Market::Fx),
            other => Err(MoexError::UnknownMarket(other.to_string())),
        }
    }
}

/// Board code to market lookup.
// TODO: extend with the remaining trading modes (TQTF, TQCB, TQOB, ...).
const BOARD_MARKETS: &[(&str, Market)] = &[
    ("TQBR", Market::Shares),
    ("SPBFUT", Market::Futures),
    ("CETS", Market::Fx),
];

/// Market served by a board code, if known.
pub fn board_market(board: &str) -> Option<Market> {
    BOARD_MARKETS
        .iter()
        .find(|(code, _)| *code == board)
        .map(|(_, market)| *market)
}

/// Split a dataset name of the form `<board>.<symbol>` into market and symbol.
///
/// The symbol keeps any further `.` separators. A name without a board prefix
/// yields `None` together with the full name.
///
/// ```rust
/// use moex_api_client::types::{Market, dataname_to_market_symbol};
///
/// assert_eq!(
///     dataname_to_market_symbol("TQBR.SBER"),
///     (Some(Market::Shares), "SBER".to_string())
/// );
/// assert_eq!(dataname_to_market_symbol("SBER"), (None, "SBER".to_string()));
/// ```
pub fn dataname_to_market_symbol(dataname: &str) -> (Option<Market>, String) {
    match dataname.split_once('.') {
        Some((board, symbol)) => match board_market(board) {
            Some(market) => (Some(market), symbol.to_string()),
            None => (None, dataname.to_string()),
        },
        None => (None, dataname.to_string()),
    }
}

/// Dataset name of the front quarterly futures contract on `base` for `date`.
///
/// Month codes are H (March), M (June), U (September), Z (December). After the
/// 15th of an expiry month the next contract is used.
///
/// ```rust
/// use moex_api_client::types::futures_contract_on;
/// use time::macros::date;
///
/// assert_eq!(futures_contract_on("Si", date!(2024 - 05 - 10)), "SPBFUT.SiM4");
/// assert_eq!(futures_contract_on("RI", date!(2024 - 06 - 20)), "SPBFUT.RIU4");
/// ```
pub fn futures_contract_on(base: &str, date: Date) -> String {
    let quarterly = matches!(
        date.month(),
        Month::March | Month::June | Month::September | Month::December
    );
    let date = if date.day() > 15 && quarterly {
        date.saturating_add(Duration::days(30))
    } else {
        date
    };
    let period = match u8::from(date.month()) {
        1..=3 => 'H',
        4..=6 => 'M',
        7..=9 => 'U',
        _ => 'Z',
    };
    let digit = date.year().rem_euclid(10);
    format!("SPBFUT.{base}{period}{digit}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_known_boards() {
        assert_eq!(
            dataname_to_market_symbol("SPBFUT.SiH5"),
            (Some(Market::Futures), "SiH5".to_string())
        );
        assert_eq!(
            dataname_to_market_symbol("CETS.USD000UTSTOM"),
            (Some(Market::Fx), "USD000UTSTOM".to_string())
        );
    }

    #[test]
    fn test_symbol_keeps_separators() {
        assert_eq!(
            dataname_to_market_symbol("TQBR.ABC.PREF.X"),
            (Some(Market::Shares), "ABC.PREF.X".to_string())
        );
    }

    #[test]
    fn test_unknown_board_keeps_full_name() {
        assert_eq!(
            dataname_to_market_symbol("TQTF.FXGD"),
            (None, "TQTF.FXGD".to_string())
        );
        assert_eq!(dataname_to_market_symbol(""), (None, String::new()));
    }

    #[test]
    fn test_market_from_str() {
        assert_eq!("shares".parse::<Market>().unwrap(), Market::Shares);
        assert_eq!(Market::Futures.to_string(), "futures");
        assert!(matches!(
            "bonds".parse::<Market>(),
            Err(MoexError::UnknownMarket(m)) if m == "bonds"
        ));
    }

    #[test]
    fn test_futures_contract_rolls_after_expiry() {
        assert_eq!(futures_contract_on("Si", date!(2024 - 03 - 15)), "SPBFUT.SiH4");
        assert_eq!(futures_contract_on("Si", date!(2024 - 03 - 16)), "SPBFUT.SiM4");
        assert_eq!(futures_contract_on("Si", date!(2024 - 11 - 30)), "SPBFUT.SiZ4");
        assert_eq!(futures_contract_on("Si", date!(2024 - 12 - 20)), "SPBFUT.SiH5");
        assert_eq!(futures_contract_on("RI", date!(2029 - 08 - 01)), "SPBFUT.RIU9");
    }
}
