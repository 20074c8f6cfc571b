//! Futures open interest (FUTOI) analytics endpoints.

use time::Date;

use crate::error::MoexError;
use crate::rest::MoexClient;
use crate::rest::endpoints::futoi;
use crate::types::IssResponse;
use crate::types::datetime::format_iss_date;

impl MoexClient {
    /// Open interest for all futures on a trading date.
    ///
    /// Dataset: `futoi`. All pages are merged.
    pub async fn try_get_all_futoi(&self, date: Date) -> Result<Option<IssResponse>, MoexError> {
        let params = [("date", format_iss_date(date)?)];
        self.paginate_offset(futoi::ALL, "futoi", &params).await
    }

    /// Like [`try_get_all_futoi`](Self::try_get_all_futoi), logging failures as `None`.
    pub async fn get_all_futoi(&self, date: Date) -> Option<IssResponse> {
        let result = self.try_get_all_futoi(date).await;
        self.report("get_all_futoi", result)
    }

    /// Open interest history for one futures ticker between two dates, inclusive.
    ///
    /// Dataset: `futoi`. The server ignores `start` on this endpoint, so the range
    /// is fetched in two-day windows from `till` backwards. Rows are therefore in
    /// window order, and a row on a window boundary may be returned twice.
    pub async fn try_get_futoi(
        &self,
        ticker: &str,
        from: Date,
        till: Date,
    ) -> Result<Option<IssResponse>, MoexError> {
        let endpoint = futoi::ticker(ticker);
        self.fetch_day_chunks(&endpoint, "futoi", from, till).await
    }

    /// Like [`try_get_futoi`](Self::try_get_futoi), logging failures as `None`.
    pub async fn get_futoi(&self, ticker: &str, from: Date, till: Date) -> Option<IssResponse> {
        let result = self.try_get_futoi(ticker, from, till).await;
        self.report("get_futoi", result)
    }
}
