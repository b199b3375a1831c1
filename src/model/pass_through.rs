//! Test model: echoes the fitted values and repeats the last one for the horizon.

use crate::model::error::ModelError;
use crate::model::{prediction_frame, ForecastModel, TrainingSeries};
use polars::prelude::DataFrame;

#[derive(Debug, Default)]
pub(crate) struct PassThroughModel {
    series: Option<TrainingSeries>,
}

impl ForecastModel for PassThroughModel {
    fn fit(&mut self, history: &DataFrame) -> Result<(), ModelError> {
        self.series = Some(TrainingSeries::from_frame(history)?);
        Ok(())
    }

    fn predict(&self, periods: usize) -> Result<DataFrame, ModelError> {
        let series = self.series.as_ref().ok_or(ModelError::NotFitted)?;
        let total = series.prediction_len(periods)?;
        let last = *series.values.last().ok_or(ModelError::EmptyHistory)?;
        let mut predicted = series.values.clone();
        predicted.resize(total, last);
        prediction_frame(series.first_date, predicted, None)
    }
}
