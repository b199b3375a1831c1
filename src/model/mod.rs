//! The boundary to the forecasting model.
//!
//! A model is fitted on a two-column frame (`ds` dates, `y` values) without
//! gaps and asked for predictions over the fitted span plus a number of future
//! days, returned as `ds` and `yhat` (optionally `yhat_lower`/`yhat_upper`).
//! The orchestrator builds a fresh instance for every run through `Default`.

pub mod error;
pub mod ets;

#[cfg(test)]
pub(crate) mod pass_through;

use crate::model::error::ModelError;
use crate::utils::{date_column, read_dates, read_floats};
use chrono::{Days, NaiveDate};
use polars::prelude::*;

/// Date column of model input and output.
pub const DS_COLUMN: &str = "ds";
/// Observed values fed to [`ForecastModel::fit`].
pub const Y_COLUMN: &str = "y";
/// Point predictions returned by [`ForecastModel::predict`].
pub const YHAT_COLUMN: &str = "yhat";
pub const YHAT_LOWER_COLUMN: &str = "yhat_lower";
pub const YHAT_UPPER_COLUMN: &str = "yhat_upper";

/// Longest horizon any model is asked for.
pub const MAX_FORECAST_DAYS: usize = 365;

/// A time-series model that can be fitted once and then queried.
pub trait ForecastModel {
    /// Fits the model on `history`, a frame with a `ds` Date column and a `y` f64 column.
    fn fit(&mut self, history: &DataFrame) -> Result<(), ModelError>;

    /// Predicts every fitted day followed by `periods` future days.
    ///
    /// The returned frame has a `ds` column starting at the first fitted date
    /// and a `yhat` column; interval columns are optional.
    fn predict(&self, periods: usize) -> Result<DataFrame, ModelError>;
}

/// A fitted series as the models see it: the first date and one value per day.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrainingSeries {
    pub first_date: NaiveDate,
    pub values: Vec<f64>,
}

impl TrainingSeries {
    /// Number of rows a prediction over this series plus `periods` days has.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::HorizonTooLarge`] above [`MAX_FORECAST_DAYS`].
    pub(crate) fn prediction_len(&self, periods: usize) -> Result<usize, ModelError> {
        let too_large = ModelError::HorizonTooLarge {
            periods,
            max: MAX_FORECAST_DAYS,
        };
        if periods > MAX_FORECAST_DAYS {
            return Err(too_large);
        }
        self.values.len().checked_add(periods).ok_or(too_large)
    }

    /// Reads `ds` and `y` from a model input frame, rejecting nulls and empty input.
    pub(crate) fn from_frame(history: &DataFrame) -> Result<Self, ModelError> {
        let dates = read_dates(history, DS_COLUMN)?;
        let values = read_floats(history, Y_COLUMN)?;

        let first_date = match dates.first() {
            Some(Some(date)) => *date,
            Some(None) => {
                return Err(ModelError::NullValue {
                    column: DS_COLUMN,
                    row: 0,
                })
            }
            None => return Err(ModelError::EmptyHistory),
        };

        let values = values
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.ok_or(ModelError::NullValue { column: Y_COLUMN, row }))
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(Self { first_date, values })
    }
}

/// Builds a prediction frame of consecutive days starting at `first_date`.
///
/// `bounds` holds the lower and upper interval columns when available; they
/// must have the same length as `predicted`.
pub(crate) fn prediction_frame(
    first_date: NaiveDate,
    predicted: Vec<f64>,
    bounds: Option<(Vec<f64>, Vec<f64>)>,
) -> Result<DataFrame, ModelError> {
    let dates = (0..predicted.len() as u64)
        .map(|offset| {
            first_date
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| ModelError::Predict(format!("date overflow {offset} days after {first_date}")))
        })
        .collect::<Result<Vec<NaiveDate>, _>>()?;

    let mut columns = vec![
        date_column(DS_COLUMN, &dates)?,
        Column::new(YHAT_COLUMN.into(), predicted),
    ];
    if let Some((lower, upper)) = bounds {
        columns.push(Column::new(YHAT_LOWER_COLUMN.into(), lower));
        columns.push(Column::new(YHAT_UPPER_COLUMN.into(), upper));
    }
    Ok(DataFrame::new(columns)?)
}
