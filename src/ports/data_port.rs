//! Data access port trait.

use crate::domain::error::StratsimError;
use crate::domain::series::PriceSeries;
use chrono::NaiveDate;

pub trait DataPort {
    /// Load the daily series for one symbol, clipped to the optional
    /// inclusive date bounds. Candles come back validated and ascending.
    fn fetch_series(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<PriceSeries, StratsimError>;

    /// Symbols this source can serve, sorted.
    fn list_symbols(&self) -> Result<Vec<String>, StratsimError>;

    /// First date, last date and row count for a symbol, or `None` when the
    /// symbol has no rows at all.
    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StratsimError>;
}
