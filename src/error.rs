use crate::model::error::ModelError;
use crate::preferences::error::PreferenceError;
use crate::types::error::SeriesError;
use crate::types::form::FormField;
use crate::weather_data::error::WeatherDataError;
use polars::error::PolarsError;
use std::fmt;
use thiserror::Error;

/// The four categories a failed forecast run is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or missing form input, caught before any network access.
    Validation,
    /// The weather API answered with a non-success status.
    Api,
    /// The weather API answered successfully but without the expected fields.
    MissingData,
    /// Anything else: transport failures, model failures, I/O.
    Unclassified,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Api => "ApiError",
            ErrorKind::MissingData => "MissingDataError",
            ErrorKind::Unclassified => "UnclassifiedError",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: FormField, reason: String },

    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Preferences(#[from] PreferenceError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Model returned an unusable forecast")]
    Series(#[from] SeriesError),

    #[error("Failed building the model input frame")]
    Frame(#[from] PolarsError),

    #[error("No historical data to forecast from")]
    NothingToForecast,

    #[error("Forecast run ended without reporting a result")]
    RunAborted,

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ForecastError {
    pub(crate) fn validation(field: FormField, reason: impl Into<String>) -> Self {
        ForecastError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastError::Validation { .. } => ErrorKind::Validation,
            ForecastError::WeatherData(WeatherDataError::ApiStatus { .. }) => ErrorKind::Api,
            ForecastError::WeatherData(WeatherDataError::MissingData { .. }) => {
                ErrorKind::MissingData
            }
            _ => ErrorKind::Unclassified,
        }
    }

    /// The form field a validation error refers to.
    pub fn field(&self) -> Option<FormField> {
        match self {
            ForecastError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
