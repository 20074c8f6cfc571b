//! Date and time formats used in ISS query parameters and rows.

use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, offset};
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::MoexError;

/// Moscow time. The exchange works in UTC+3 without daylight saving.
pub const MOSCOW_OFFSET: UtcOffset = offset!(+3);

/// `2024-01-03 23:59:59`
pub const ISS_DATETIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// `2024-01-03`
pub const ISS_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Current wall-clock time in Moscow.
pub fn moscow_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(MOSCOW_OFFSET);
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Current trading date in Moscow.
pub fn moscow_today() -> Date {
    moscow_now().date()
}

/// Parse a timestamp in the ISS row format.
pub fn parse_iss_datetime(s: &str) -> Result<PrimitiveDateTime, MoexError> {
    PrimitiveDateTime::parse(s, ISS_DATETIME)
        .map_err(|e| MoexError::InvalidResponse(format!("bad timestamp '{s}': {e}")))
}

pub(crate) fn format_iss_datetime(dt: PrimitiveDateTime) -> Result<String, MoexError> {
    dt.format(ISS_DATETIME)
        .map_err(|e| MoexError::InvalidResponse(e.to_string()))
}

pub(crate) fn format_iss_date(date: Date) -> Result<String, MoexError> {
    date.format(ISS_DATE)
        .map_err(|e| MoexError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_parse_and_format() {
        let dt = parse_iss_datetime("2024-01-03 23:59:59").unwrap();
        assert_eq!(dt, datetime!(2024-01-03 23:59:59));
        assert_eq!(format_iss_datetime(dt).unwrap(), "2024-01-03 23:59:59");
        assert_eq!(format_iss_date(date!(2024 - 03 - 05)).unwrap(), "2024-03-05");
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse_iss_datetime("2024-01-03T23:59:59").is_err());
        assert!(parse_iss_datetime("2024-01-03").is_err());
    }
}
