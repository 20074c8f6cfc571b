//! Multi-page retrieval for ISS endpoints.
//!
//! Three strategies are used depending on what the endpoint supports:
//!
//! - **Offset**: request with `start = 0, n, n + m, ...` until an empty page.
//! - **Time window**: request `[from, till)` and move `from` past the last
//!   returned candle until an empty page or `from >= till`.
//! - **Day chunks**: one request per two-day window, walking back from the end
//!   date. Used where the `start` offset is ignored by the server.
//!
//! Pages are merged with [`PageAccumulator`]: the first page is kept whole and
//! later pages only contribute rows. Column schemas are taken from the first page.

use time::{Date, Duration, PrimitiveDateTime};
use tracing::debug;

use crate::error::MoexError;
use crate::rest::MoexClient;
use crate::types::datetime::{format_iss_date, format_iss_datetime, parse_iss_datetime};
use crate::types::{IssResponse, Row};

/// Merges pages of one dataset into a single response.
#[derive(Debug, Clone)]
pub struct PageAccumulator {
    dataset: String,
    result: Option<IssResponse>,
}

impl PageAccumulator {
    /// Create an empty accumulator for the named dataset.
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            result: None,
        }
    }

    /// Add a page: adopted whole if it is the first, otherwise its rows are appended.
    ///
    /// Returns the number of rows the page carried.
    pub fn push(&mut self, mut page: IssResponse) -> Result<usize, MoexError> {
        let rows = page
            .dataset_mut(&self.dataset)
            .map(|d| std::mem::take(&mut d.data))
            .ok_or_else(|| MoexError::MissingDataset(self.dataset.clone()))?;
        let received = rows.len();

        match &mut self.result {
            None => {
                if let Some(dataset) = page.dataset_mut(&self.dataset) {
                    dataset.data = rows;
                }
                self.result = Some(page);
            }
            Some(result) => {
                if let Some(dataset) = result.dataset_mut(&self.dataset) {
                    dataset.data.extend(rows);
                }
            }
        }
        Ok(received)
    }

    /// Rows collected so far.
    pub fn len(&self) -> usize {
        self.result
            .as_ref()
            .map(|r| r.rows(&self.dataset).len())
            .unwrap_or_default()
    }

    /// Whether no page has been adopted yet.
    pub fn is_empty(&self) -> bool {
        self.result.is_none()
    }

    /// The merged response, or `None` if no page was adopted.
    pub fn finish(self) -> Option<IssResponse> {
        self.result
    }
}

/// Cursor for the next time-window request: one minute past the timestamp in
/// the second-to-last column of the last candle row.
///
/// Assumes rows within a page are in chronological order.
pub fn next_window_start(last_row: &Row) -> Result<PrimitiveDateTime, MoexError> {
    let end = last_row
        .len()
        .checked_sub(2)
        .and_then(|idx| last_row.get(idx))
        .and_then(|value| value.as_str())
        .ok_or_else(|| {
            MoexError::InvalidResponse(format!("row has no end timestamp: {last_row:?}"))
        })?;
    Ok(parse_iss_datetime(end)? + Duration::minutes(1))
}

fn page_len(page: &IssResponse, dataset: &str) -> Result<usize, MoexError> {
    page.dataset(dataset)
        .map(|d| d.len())
        .ok_or_else(|| MoexError::MissingDataset(dataset.to_string()))
}

impl MoexClient {
    /// Offset pagination over the `start` parameter.
    ///
    /// Stops at the first empty page. Unbounded unless a page cap is configured.
    pub(crate) async fn paginate_offset(
        &self,
        endpoint: &str,
        dataset: &str,
        params: &[(&str, String)],
    ) -> Result<Option<IssResponse>, MoexError> {
        let mut accumulator = PageAccumulator::new(dataset);
        let mut start = 0usize;
        let mut pages = 0usize;
        loop {
            let mut query = params.to_vec();
            query.push(("start", start.to_string()));

            let page = self.get_json(endpoint, &query).await?;
            if page_len(&page, dataset)? == 0 {
                break;
            }
            self.check_page_limit(pages)?;
            start += accumulator.push(page)?;
            pages += 1;
        }
        debug!(endpoint, pages, rows = accumulator.len(), "Offset pagination finished");
        Ok(accumulator.finish())
    }

    /// Time-window pagination over `[from, till)`.
    pub(crate) async fn paginate_window(
        &self,
        endpoint: &str,
        dataset: &str,
        from: PrimitiveDateTime,
        till: PrimitiveDateTime,
        interval: u32,
    ) -> Result<Option<IssResponse>, MoexError> {
        let mut accumulator = PageAccumulator::new(dataset);
        let till_param = format_iss_datetime(till)?;
        let mut cursor = from;
        let mut pages = 0usize;
        while cursor < till {
            let query = [
                ("from", format_iss_datetime(cursor)?),
                ("till", till_param.clone()),
                ("interval", interval.to_string()),
            ];

            let page = self.get_json(endpoint, &query[..]).await?;
            let next = match page.rows(dataset).last() {
                Some(last) => next_window_start(last)?,
                None => {
                    page_len(&page, dataset)?;
                    break;
                }
            };
            self.check_page_limit(pages)?;
            accumulator.push(page)?;
            cursor = next;
            pages += 1;
        }
        debug!(endpoint, pages, rows = accumulator.len(), "Window pagination finished");
        Ok(accumulator.finish())
    }

    /// Two-day windows walking back from `till` to `from`, both inclusive.
    ///
    /// The first response is kept even when it has no rows so the envelope and
    /// columns are always present. Windows are not de-duplicated: rows on a
    /// shared boundary can appear twice.
    pub(crate) async fn fetch_day_chunks(
        &self,
        endpoint: &str,
        dataset: &str,
        from: Date,
        till: Date,
    ) -> Result<Option<IssResponse>, MoexError> {
        let mut accumulator = PageAccumulator::new(dataset);
        let days = (till - from).whole_days();
        for i in (0..=days).step_by(2) {
            let query = [
                ("from", format_iss_date(till.saturating_sub(Duration::days(i + 1)))?),
                ("till", format_iss_date(till.saturating_sub(Duration::days(i)))?),
            ];
            let page = self.get_json(endpoint, &query[..]).await?;
            accumulator.push(page)?;
        }
        debug!(endpoint, days, rows = accumulator.len(), "Day-chunk retrieval finished");
        Ok(accumulator.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn page(rows: serde_json::Value) -> IssResponse {
        serde_json::from_value(json!({
            "futoi": { "columns": ["sess_id", "ticker"], "data": rows },
            "futoi.cursor": { "columns": ["INDEX"], "data": [[0]] }
        }))
        .unwrap()
    }

    #[test]
    fn test_first_page_is_adopted_whole() {
        let mut acc = PageAccumulator::new("futoi");
        assert!(acc.is_empty());
        assert_eq!(acc.push(page(json!([[1, "si"], [2, "si"]]))).unwrap(), 2);
        assert_eq!(acc.push(page(json!([[3, "si"]]))).unwrap(), 1);

        let result = acc.finish().unwrap();
        assert_eq!(result.rows("futoi").len(), 3);
        assert_eq!(result.rows("futoi")[2][0], json!(3));
        // Other datasets come from the first page only.
        assert_eq!(result.rows("futoi.cursor").len(), 1);
    }

    #[test]
    fn test_empty_first_page_is_kept() {
        let mut acc = PageAccumulator::new("futoi");
        assert_eq!(acc.push(page(json!([]))).unwrap(), 0);
        assert!(!acc.is_empty());
        acc.push(page(json!([[1, "si"]]))).unwrap();
        let result = acc.finish().unwrap();
        assert_eq!(result.dataset("futoi").unwrap().columns, vec!["sess_id", "ticker"]);
        assert_eq!(result.rows("futoi").len(), 1);
    }

    #[test]
    fn test_missing_dataset_is_an_error() {
        let mut acc = PageAccumulator::new("candles");
        assert!(matches!(
            acc.push(page(json!([]))),
            Err(MoexError::MissingDataset(name)) if name == "candles"
        ));
        assert!(acc.finish().is_none());
    }

    #[test]
    fn test_next_window_start() {
        let row = vec![
            json!(300.5),
            json!(301.0),
            json!("2024-01-03 00:00:00"),
            json!("2024-01-03 23:59:59"),
            json!("extra"),
        ];
        assert_eq!(next_window_start(&row).unwrap(), datetime!(2024-01-04 00:00:59));
    }

    #[test]
    fn test_next_window_start_rejects_bad_rows() {
        assert!(next_window_start(&vec![json!("2024-01-03 23:59:59")]).is_err());
        assert!(next_window_start(&vec![json!(1), json!(2)]).is_err());
    }
}
