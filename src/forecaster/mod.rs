//! One "run forecast" action, from raw form text to chart-ready series.

mod request;

pub use request::FORM_DATE_FORMAT;

use crate::error::ForecastError;
use crate::forecaster::request::ForecastRequest;
use crate::model::error::ModelError;
use crate::model::ForecastModel;
use crate::preferences::store::{PreferenceRecord, PreferenceStore};
use crate::types::combined_series::CombinedSeries;
use crate::types::forecast_table::ForecastTable;
use crate::types::form::FormInput;
use crate::types::historical_table::HistoricalTable;
use crate::weather_data::fetcher::WeatherFetcher;
use bon::bon;
use log::info;
use polars::prelude::DataFrame;
use std::marker::PhantomData;

/// The outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    pub city: String,
    pub forecast_days: usize,
    pub history: HistoricalTable,
    pub forecast: ForecastTable,
    pub combined: CombinedSeries,
}

/// Runs forecasts with a fresh `M` per run.
///
/// Holds no per-run state, so one instance can serve any number of
/// sequential or concurrent runs.
pub struct Forecaster<M> {
    fetcher: WeatherFetcher,
    store: PreferenceStore,
    model: PhantomData<fn() -> M>,
}

#[bon]
impl<M: ForecastModel + Default + 'static> Forecaster<M> {
    /// # Examples
    ///
    /// ```no_run
    /// use tempcast::{EtsModel, Forecaster, PreferenceStore, WeatherFetcher};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let forecaster = Forecaster::<EtsModel>::builder()
    ///     .fetcher(WeatherFetcher::builder().build()?)
    ///     .store(PreferenceStore::open_default()?)
    ///     .build();
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(fetcher: WeatherFetcher, store: PreferenceStore) -> Self {
        Self {
            fetcher,
            store,
            model: PhantomData,
        }
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Validates `input`, saves it, fetches the history, fits the model and
    /// composes the chart series.
    ///
    /// The raw input is saved once every field parses, before the date order
    /// is checked, so a reversed range is still remembered. Nothing is
    /// fetched for invalid input and nothing is retried.
    pub async fn run(&self, input: FormInput) -> Result<ForecastRun, ForecastError> {
        let request = ForecastRequest::parse(&input)?;
        self.store
            .save_async(PreferenceRecord::from(&input))
            .await?;
        request.ensure_ordered()?;

        info!(
            "Forecasting {} days for '{}' from {} observed days",
            request.forecast_days,
            request.city,
            request.day_count()
        );
        let history = self
            .fetcher
            .fetch(&request.api_key, &request.city, request.start, request.end)
            .await?;
        if history.is_empty() {
            return Err(ForecastError::NothingToForecast);
        }

        let training = history.to_model_frame()?;
        let horizon = request.forecast_days;
        let predictions =
            tokio::task::spawn_blocking(move || fit_and_predict::<M>(&training, horizon)).await??;

        let forecast = ForecastTable::from_frame(&predictions)?;
        forecast.ensure_covers(&history, horizon)?;
        let combined = CombinedSeries::compose(&request.city, &history, &forecast)
            .ok_or(ForecastError::NothingToForecast)?;
        info!(
            "Forecast for '{}' ready: {} predicted days, boundary {}",
            request.city,
            forecast.len(),
            combined.boundary
        );

        Ok(ForecastRun {
            city: request.city,
            forecast_days: horizon,
            history,
            forecast,
            combined,
        })
    }
}

fn fit_and_predict<M: ForecastModel + Default>(
    training: &DataFrame,
    horizon: usize,
) -> Result<DataFrame, ModelError> {
    let mut model = M::default();
    model.fit(training)?;
    model.predict(horizon)
}
