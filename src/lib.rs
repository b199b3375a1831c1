mod error;
mod forecaster;
mod model;
mod preferences;
mod presentation;
mod types;
mod utils;
mod weather_data;

pub use error::{ErrorKind, ForecastError};
pub use forecaster::{ForecastRun, Forecaster, FORM_DATE_FORMAT};

pub use model::ets::{EtsModel, CONFIDENCE_LEVEL, MIN_ETS_POINTS};
pub use model::{
    ForecastModel, DS_COLUMN, MAX_FORECAST_DAYS, YHAT_COLUMN, YHAT_LOWER_COLUMN,
    YHAT_UPPER_COLUMN, Y_COLUMN,
};

pub use preferences::store::{PreferenceRecord, PreferenceStore};

pub use presentation::form::InputForm;
pub use presentation::{chart, notify};

pub use types::combined_series::{CombinedSeries, SeriesPoint};
pub use types::forecast_table::{ForecastPoint, ForecastTable};
pub use types::form::{FormField, FormInput};
pub use types::historical_table::{DailyObservation, HistoricalTable, DATE_COLUMN, TEMPERATURE_COLUMN};

pub use weather_data::client::{WeatherApiClient, WeatherApiConfig};
pub use weather_data::fetcher::{FetchProgress, WeatherFetcher};

pub use model::error::ModelError;
pub use preferences::error::PreferenceError;
pub use types::error::SeriesError;
pub use weather_data::error::WeatherDataError;
