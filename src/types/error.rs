use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Dates must be consecutive days: {next} follows {previous}")]
    NotContiguous {
        previous: NaiveDate,
        next: NaiveDate,
    },

    #[error("Column '{column}' has no value at row {row}")]
    NullValue { column: &'static str, row: usize },

    #[error("Forecast starts at {found}, expected the first historical date {expected}")]
    Misaligned { expected: NaiveDate, found: NaiveDate },

    #[error("Forecast has {found} rows, expected at least {expected}")]
    TooShort { expected: usize, found: usize },

    #[error("{observed} observed days plus a {horizon} day horizon is out of range")]
    HorizonOverflow { observed: usize, horizon: usize },

    #[error("Failed reading forecast frame")]
    Frame(#[from] PolarsError),
}
