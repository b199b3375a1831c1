//! Observed daily average temperatures, in date order.

use crate::model::{DS_COLUMN, Y_COLUMN};
use crate::types::ensure_contiguous;
use crate::types::error::SeriesError;
use crate::utils::date_column;
use chrono::NaiveDate;
use polars::prelude::*;

/// Name of the date column in [`HistoricalTable::to_frame`].
pub const DATE_COLUMN: &str = "date";
/// Name of the temperature column in [`HistoricalTable::to_frame`].
pub const TEMPERATURE_COLUMN: &str = "avgtemp_c";

/// The average temperature of one calendar day, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub avg_temp_c: f64,
}

/// An ordered run of [`DailyObservation`]s with exactly one entry per day.
///
/// Construction rejects gaps, duplicates and out-of-order dates, so every
/// table that exists covers a contiguous date range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalTable {
    observations: Vec<DailyObservation>,
}

impl HistoricalTable {
    /// Creates a table from observations already sorted by date.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NotContiguous`] if two neighbouring observations
    /// are not exactly one day apart.
    pub fn new(observations: Vec<DailyObservation>) -> Result<Self, SeriesError> {
        ensure_contiguous(observations.iter().map(|o| o.date))?;
        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// The boundary date: the last day with observed data.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// The table as a polars frame with columns `date` (Date) and `avgtemp_c` (f64).
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<NaiveDate> = self.observations.iter().map(|o| o.date).collect();
        let temps: Vec<f64> = self.observations.iter().map(|o| o.avg_temp_c).collect();
        DataFrame::new(vec![
            date_column(DATE_COLUMN, &dates)?,
            Column::new(TEMPERATURE_COLUMN.into(), temps),
        ])
    }

    /// The table renamed into the schema forecast models consume: `ds` and `y`.
    pub fn to_model_frame(&self) -> PolarsResult<DataFrame> {
        let mut frame = self.to_frame()?;
        frame.set_column_names([DS_COLUMN, Y_COLUMN])?;
        Ok(frame)
    }
}
