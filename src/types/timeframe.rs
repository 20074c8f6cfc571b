//! Candle timeframes and the exchange's interval codes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MoexError;

/// Candle aggregation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// 1 minute
    M1,
    /// 10 minutes
    M10,
    /// 1 hour
    M60,
    /// 1 day
    D1,
    /// 1 week
    W1,
    /// 1 month
    MN1,
    /// 1 quarter
    MN3,
}

impl Timeframe {
    /// All supported timeframes.
    pub const ALL: [Timeframe; 7] = [
        Timeframe::M1,
        Timeframe::M10,
        Timeframe::M60,
        Timeframe::D1,
        Timeframe::W1,
        Timeframe::MN1,
        Timeframe::MN3,
    ];

    /// Generic timeframe code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M1 => "M1",
            Timeframe::M10 => "M10",
            Timeframe::M60 => "M60",
            Timeframe::D1 => "D1",
            Timeframe::W1 => "W1",
            Timeframe::MN1 => "MN1",
            Timeframe::MN3 => "MN3",
        }
    }

    /// Exchange interval code used by the candles endpoint.
    pub fn interval(&self) -> u32 {
        match self {
            Timeframe::M1 => 1,
            Timeframe::M10 => 10,
            Timeframe::M60 => 60,
            Timeframe::D1 => 24,
            Timeframe::W1 => 7,
            Timeframe::MN1 => 31,
            Timeframe::MN3 => 4,
        }
    }

    /// Timeframe for an exchange interval code.
    pub fn from_interval(interval: u32) -> Result<Self, MoexError> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.interval() == interval)
            .ok_or(MoexError::UnsupportedInterval(interval))
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = MoexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| MoexError::UnsupportedTimeframe(s.to_string()))
    }
}

/// Translate a generic timeframe code (`"M1"`, `"D1"`, ...) to the exchange interval code.
pub fn timeframe_to_moex_interval(tf: &str) -> Result<u32, MoexError> {
    tf.parse::<Timeframe>().map(|tf| tf.interval())
}

/// Translate an exchange interval code back to the generic timeframe code.
pub fn moex_interval_to_timeframe(interval: u32) -> Result<&'static str, MoexError> {
    Timeframe::from_interval(interval).map(|tf| tf.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_codes() {
        assert_eq!(timeframe_to_moex_interval("M1").unwrap(), 1);
        assert_eq!(timeframe_to_moex_interval("D1").unwrap(), 24);
        assert_eq!(timeframe_to_moex_interval("W1").unwrap(), 7);
        assert_eq!(timeframe_to_moex_interval("MN3").unwrap(), 4);
        assert_eq!(moex_interval_to_timeframe(31).unwrap(), "MN1");
    }

    #[test]
    fn test_translation_is_bijective() {
        for tf in Timeframe::ALL {
            let code = timeframe_to_moex_interval(tf.as_str()).unwrap();
            assert_eq!(moex_interval_to_timeframe(code).unwrap(), tf.as_str());
        }
    }

    #[test]
    fn test_unsupported_values_fail() {
        for tf in ["H1", "m1", "M", "D", "", "M1 "] {
            assert!(matches!(
                timeframe_to_moex_interval(tf),
                Err(MoexError::UnsupportedTimeframe(_))
            ));
        }
        for code in [0, 2, 5, 30, 1440] {
            assert!(matches!(
                moex_interval_to_timeframe(code),
                Err(MoexError::UnsupportedInterval(c)) if c == code
            ));
        }
    }
}
