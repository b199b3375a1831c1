use crate::types::error::SeriesError;
use crate::weather_data::response::api_error_message;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Failed to initialise HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Weather API returned {status} for {date}: {}", api_error_message(.body))]
    ApiStatus {
        date: NaiveDate,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Weather API response for {date} has no forecast day data")]
    MissingData { date: NaiveDate },

    #[error("Weather API response for {date} is not valid JSON")]
    JsonParse {
        date: NaiveDate,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),
}
