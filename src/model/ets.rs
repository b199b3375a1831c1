//! Default forecasting model: automatic exponential smoothing from `augurs`.

use crate::model::error::ModelError;
use crate::model::{prediction_frame, ForecastModel, TrainingSeries};
use augurs::ets::AutoETS;
use augurs::prelude::*;
use log::{debug, info};
use polars::prelude::DataFrame;

/// Level of the prediction intervals reported in `yhat_lower`/`yhat_upper`.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Fewest observations AutoETS will fit; shorter series get a naive forecast.
pub const MIN_ETS_POINTS: usize = 7;

type FittedEts = <AutoETS as Fit>::Fitted;

enum Fitted {
    Ets(FittedEts),
    /// Repeats the last observation; no intervals.
    Naive,
}

/// Non-seasonal AutoETS. The best error/trend combination is selected by
/// information criterion when fitting.
///
/// Produces in-sample predictions for the fitted span and out-of-sample
/// predictions with 95% intervals for the horizon. Series shorter than
/// [`MIN_ETS_POINTS`] are forecast naively: the fitted span echoes the
/// observations and every future day repeats the last one.
#[derive(Default)]
pub struct EtsModel {
    fitted: Option<(TrainingSeries, Fitted)>,
}

impl ForecastModel for EtsModel {
    fn fit(&mut self, history: &DataFrame) -> Result<(), ModelError> {
        let series = TrainingSeries::from_frame(history)?;
        let fitted = if series.values.len() < MIN_ETS_POINTS {
            info!(
                "Only {} days starting {}, using a naive forecast",
                series.values.len(),
                series.first_date
            );
            Fitted::Naive
        } else {
            debug!(
                "Fitting AutoETS on {} days starting {}",
                series.values.len(),
                series.first_date
            );
            let model = AutoETS::non_seasonal()
                .fit(&series.values)
                .map_err(|e| ModelError::Fit(e.to_string()))?;
            Fitted::Ets(model)
        };
        self.fitted = Some((series, fitted));
        Ok(())
    }

    fn predict(&self, periods: usize) -> Result<DataFrame, ModelError> {
        let (series, fitted) = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        let total = series.prediction_len(periods)?;

        let fitted = match fitted {
            Fitted::Ets(model) => model,
            Fitted::Naive => {
                let last = *series.values.last().ok_or(ModelError::EmptyHistory)?;
                let mut predicted = Vec::with_capacity(total);
                predicted.extend_from_slice(&series.values);
                predicted.resize(total, last);
                return prediction_frame(series.first_date, predicted, None);
            }
        };

        let in_sample = fitted
            .predict_in_sample(CONFIDENCE_LEVEL)
            .map_err(|e| ModelError::Predict(e.to_string()))?;
        let mut predicted = in_sample.point;
        let mut lower = Vec::with_capacity(total);
        let mut upper = Vec::with_capacity(total);
        let mut has_bounds = false;
        if let Some(intervals) = in_sample.intervals {
            lower.extend(intervals.lower);
            upper.extend(intervals.upper);
            has_bounds = true;
        }

        if periods > 0 {
            let future = fitted
                .predict(periods, CONFIDENCE_LEVEL)
                .map_err(|e| ModelError::Predict(e.to_string()))?;
            predicted.extend(future.point);
            match future.intervals {
                Some(intervals) if has_bounds => {
                    lower.extend(intervals.lower);
                    upper.extend(intervals.upper);
                }
                _ => has_bounds = false,
            }
        }

        let bounds = (has_bounds && lower.len() == predicted.len() && upper.len() == predicted.len())
            .then_some((lower, upper));
        prediction_frame(series.first_date, predicted, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_FORECAST_DAYS;
    use crate::types::forecast_table::ForecastTable;
    use crate::types::historical_table::{DailyObservation, HistoricalTable};
    use chrono::{Days, NaiveDate};

    fn linear_history(days: u64) -> HistoricalTable {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        HistoricalTable::new(
            (0..days)
                .map(|i| DailyObservation {
                    date: start + Days::new(i),
                    avg_temp_c: 2.0 + i as f64 * 0.3 + if i % 2 == 0 { 0.4 } else { -0.4 },
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_predict_before_fit() {
        let model = EtsModel::default();
        assert!(matches!(model.predict(3), Err(ModelError::NotFitted)));
    }

    #[test]
    fn test_fit_empty_history() -> Result<(), Box<dyn std::error::Error>> {
        let mut model = EtsModel::default();
        let frame = HistoricalTable::default().to_model_frame()?;
        assert!(matches!(model.fit(&frame), Err(ModelError::EmptyHistory)));
        Ok(())
    }

    fn predict_table(
        history: &HistoricalTable,
        horizon: usize,
    ) -> Result<ForecastTable, Box<dyn std::error::Error>> {
        let mut model = EtsModel::default();
        model.fit(&history.to_model_frame()?)?;
        let forecast = ForecastTable::from_frame(&model.predict(horizon)?)?;
        forecast.ensure_covers(history, horizon)?;
        Ok(forecast)
    }

    #[test]
    fn test_short_histories_repeat_last_value() -> Result<(), Box<dyn std::error::Error>> {
        for days in [1, 3, 6] {
            let history = linear_history(days);
            let forecast = predict_table(&history, 2)?;

            assert_eq!(forecast.len(), days as usize + 2, "{} days", days);
            let last = history.observations().last().unwrap().avg_temp_c;
            let tail: Vec<f64> = forecast.points()[days as usize..]
                .iter()
                .map(|p| p.predicted)
                .collect();
            assert_eq!(tail, vec![last, last], "{} days", days);
            assert!(forecast.points().iter().all(|p| p.lower.is_none()));
        }
        Ok(())
    }

    #[test]
    fn test_seven_days_use_ets() -> Result<(), Box<dyn std::error::Error>> {
        let history = linear_history(MIN_ETS_POINTS as u64);
        let forecast = predict_table(&history, 2)?;
        assert_eq!(forecast.len(), MIN_ETS_POINTS + 2);
        assert!(forecast.points().iter().all(|p| p.predicted.is_finite()));
        Ok(())
    }

    #[test]
    fn test_oversized_horizon_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        for history in [linear_history(3), linear_history(30)] {
            let mut model = EtsModel::default();
            model.fit(&history.to_model_frame()?)?;
            for periods in [MAX_FORECAST_DAYS + 1, usize::MAX] {
                assert!(matches!(
                    model.predict(periods),
                    Err(ModelError::HorizonTooLarge { max: MAX_FORECAST_DAYS, .. })
                ));
            }
        }
        Ok(())
    }

    #[test]
    fn test_predicts_history_plus_horizon() -> Result<(), Box<dyn std::error::Error>> {
        let history = linear_history(30);
        let mut model = EtsModel::default();
        model.fit(&history.to_model_frame()?)?;

        let forecast = ForecastTable::from_frame(&model.predict(7)?)?;
        assert_eq!(forecast.len(), 37);
        assert_eq!(forecast.points()[0].date, history.first_date().unwrap());
        forecast.ensure_covers(&history, 7)?;
        assert!(forecast.points().iter().all(|p| p.predicted.is_finite()));
        Ok(())
    }
}
