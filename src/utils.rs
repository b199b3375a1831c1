use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

// Polars stores `Date` as days since 1970-01-01; chrono counts from 0001-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub(crate) fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub(crate) fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

/// Builds a polars `Date` column from calendar days.
pub(crate) fn date_column(name: &str, dates: &[NaiveDate]) -> PolarsResult<Column> {
    let days: Vec<i32> = dates.iter().map(|d| date_to_days(*d)).collect();
    Column::new(name.into(), days).cast(&DataType::Date)
}

/// Reads a `Date` column back into calendar days. Nulls stay `None`.
pub(crate) fn read_dates(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<NaiveDate>>> {
    let dates = frame.column(name)?.date()?;
    Ok(dates
        .physical()
        .into_iter()
        .map(|days| days.and_then(days_to_date))
        .collect())
}

/// Reads a numeric column as `f64`, casting integer columns if needed.
pub(crate) fn read_floats(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}
