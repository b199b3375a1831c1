pub mod combined_series;
pub mod error;
pub mod forecast_table;
pub mod form;
pub mod historical_table;

use crate::types::error::SeriesError;
use chrono::NaiveDate;

/// Checks that `dates` is strictly ascending with exactly one day between neighbours.
pub(crate) fn ensure_contiguous(
    dates: impl IntoIterator<Item = NaiveDate>,
) -> Result<(), SeriesError> {
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        if let Some(prev) = previous {
            if prev.succ_opt() != Some(date) {
                return Err(SeriesError::NotContiguous {
                    previous: prev,
                    next: date,
                });
            }
        }
        previous = Some(date);
    }
    Ok(())
}
