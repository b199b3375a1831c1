//! Model predictions keyed by date.

use crate::model::{DS_COLUMN, YHAT_COLUMN, YHAT_LOWER_COLUMN, YHAT_UPPER_COLUMN};
use crate::types::ensure_contiguous;
use crate::types::error::SeriesError;
use crate::types::historical_table::HistoricalTable;
use crate::utils::{read_dates, read_floats};
use chrono::NaiveDate;
use polars::prelude::*;

/// A single predicted day. `lower` and `upper` bound the prediction interval
/// when the model reports one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Predictions covering the historical span followed by the forecast horizon.
///
/// Like [`HistoricalTable`], dates are strictly consecutive. Which points lie
/// beyond the historical range is decided by the boundary date, see
/// [`crate::CombinedSeries`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastTable {
    points: Vec<ForecastPoint>,
}

impl ForecastTable {
    pub fn new(points: Vec<ForecastPoint>) -> Result<Self, SeriesError> {
        ensure_contiguous(points.iter().map(|p| p.date))?;
        Ok(Self { points })
    }

    /// Reads a model output frame with columns `ds` and `yhat`, plus the
    /// optional interval columns `yhat_lower` and `yhat_upper`.
    ///
    /// # Errors
    ///
    /// * [`SeriesError::Frame`] if a required column is missing or has the wrong type.
    /// * [`SeriesError::NullValue`] if `ds` or `yhat` contains a null.
    /// * [`SeriesError::NotContiguous`] if the dates skip or repeat a day.
    pub fn from_frame(frame: &DataFrame) -> Result<Self, SeriesError> {
        let dates = read_dates(frame, DS_COLUMN)?;
        let predicted = read_floats(frame, YHAT_COLUMN)?;
        let lower = read_optional(frame, YHAT_LOWER_COLUMN)?;
        let upper = read_optional(frame, YHAT_UPPER_COLUMN)?;

        let mut points = Vec::with_capacity(dates.len());
        for (row, (date, value)) in dates.into_iter().zip(predicted).enumerate() {
            let date = date.ok_or(SeriesError::NullValue {
                column: DS_COLUMN,
                row,
            })?;
            let predicted = value.ok_or(SeriesError::NullValue {
                column: YHAT_COLUMN,
                row,
            })?;
            points.push(ForecastPoint {
                date,
                predicted,
                lower: lower.as_ref().and_then(|l| l.get(row).copied().flatten()),
                upper: upper.as_ref().and_then(|u| u.get(row).copied().flatten()),
            });
        }
        Self::new(points)
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Checks that the predictions start on the first observed day and run at
    /// least `horizon` days past the last one.
    pub fn ensure_covers(&self, history: &HistoricalTable, horizon: usize) -> Result<(), SeriesError> {
        let expected = history
            .len()
            .checked_add(horizon)
            .ok_or(SeriesError::HorizonOverflow {
                observed: history.len(),
                horizon,
            })?;
        if self.points.len() < expected {
            return Err(SeriesError::TooShort {
                expected,
                found: self.points.len(),
            });
        }
        match (history.first_date(), self.points.first()) {
            (Some(expected), Some(first)) if first.date != expected => Err(SeriesError::Misaligned {
                expected,
                found: first.date,
            }),
            _ => Ok(()),
        }
    }
}

fn read_optional(frame: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>, SeriesError> {
    if frame.get_column_index(name).is_none() {
        return Ok(None);
    }
    Ok(Some(read_floats(frame, name)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::historical_table::DailyObservation;
    use crate::utils::date_column;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn history(days: u32) -> HistoricalTable {
        HistoricalTable::new(
            (1..=days)
                .map(|d| DailyObservation {
                    date: day(d),
                    avg_temp_c: d as f64,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_from_frame_with_intervals() -> Result<(), Box<dyn std::error::Error>> {
        let frame = DataFrame::new(vec![
            date_column(DS_COLUMN, &[day(1), day(2)])?,
            Column::new(YHAT_COLUMN.into(), vec![1.5, 2.5]),
            Column::new(YHAT_LOWER_COLUMN.into(), vec![1.0, 2.0]),
            Column::new(YHAT_UPPER_COLUMN.into(), vec![2.0, 3.0]),
        ])?;

        let table = ForecastTable::from_frame(&frame)?;
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.points()[1],
            ForecastPoint {
                date: day(2),
                predicted: 2.5,
                lower: Some(2.0),
                upper: Some(3.0),
            }
        );
        Ok(())
    }

    #[test]
    fn test_from_frame_without_intervals() -> Result<(), Box<dyn std::error::Error>> {
        let frame = DataFrame::new(vec![
            date_column(DS_COLUMN, &[day(5)])?,
            Column::new(YHAT_COLUMN.into(), vec![4.0]),
        ])?;

        let table = ForecastTable::from_frame(&frame)?;
        assert_eq!(table.points()[0].lower, None);
        assert_eq!(table.points()[0].upper, None);
        Ok(())
    }

    #[test]
    fn test_from_frame_missing_yhat() -> Result<(), Box<dyn std::error::Error>> {
        let frame = DataFrame::new(vec![date_column(DS_COLUMN, &[day(1)])?])?;
        assert!(matches!(
            ForecastTable::from_frame(&frame),
            Err(SeriesError::Frame(_))
        ));
        Ok(())
    }

    #[test]
    fn test_from_frame_null_prediction() -> Result<(), Box<dyn std::error::Error>> {
        let frame = DataFrame::new(vec![
            date_column(DS_COLUMN, &[day(1), day(2)])?,
            Column::new(YHAT_COLUMN.into(), vec![Some(1.0), None]),
        ])?;
        assert!(matches!(
            ForecastTable::from_frame(&frame),
            Err(SeriesError::NullValue { column: YHAT_COLUMN, row: 1 })
        ));
        Ok(())
    }

    #[test]
    fn test_ensure_covers() {
        let point = |d: u32| ForecastPoint {
            date: day(d),
            predicted: 0.0,
            lower: None,
            upper: None,
        };
        let history = history(3);

        let full = ForecastTable::new((1..=5).map(point).collect()).unwrap();
        assert!(full.ensure_covers(&history, 2).is_ok());

        let short = ForecastTable::new((1..=4).map(point).collect()).unwrap();
        assert!(matches!(
            short.ensure_covers(&history, 2),
            Err(SeriesError::TooShort { expected: 5, found: 4 })
        ));

        let shifted = ForecastTable::new((2..=6).map(point).collect()).unwrap();
        assert!(matches!(
            shifted.ensure_covers(&history, 2),
            Err(SeriesError::Misaligned { .. })
        ));

        assert!(matches!(
            full.ensure_covers(&history, usize::MAX),
            Err(SeriesError::HorizonOverflow { observed: 3, horizon: usize::MAX })
        ));
    }
}
