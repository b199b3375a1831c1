//! HTTP access to the WeatherAPI history endpoint, one day per request.

use crate::weather_data::error::WeatherDataError;
use crate::weather_data::response::HistoryResponse;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the weather history API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// API base URL without the endpoint (default: `http://api.weatherapi.com/v1`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://api.weatherapi.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Thin client for `GET {base_url}/history.json?key=..&q=..&dt=YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    config: WeatherApiConfig,
}

impl WeatherApiClient {
    /// # Errors
    ///
    /// Returns [`WeatherDataError::ClientBuild`] if the HTTP client cannot be initialised.
    pub fn new(config: WeatherApiConfig) -> Result<Self, WeatherDataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(WeatherDataError::ClientBuild)?;
        Ok(Self { client, config })
    }

    fn history_url(&self) -> String {
        format!("{}/history.json", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetches the average temperature (°C) of `city` on `date`.
    ///
    /// # Errors
    ///
    /// * [`WeatherDataError::NetworkRequest`] if the request or reading the body fails.
    ///   The error never carries the query string, so the API key stays out of messages.
    /// * [`WeatherDataError::ApiStatus`] for any non-2xx status, carrying status and body.
    /// * [`WeatherDataError::JsonParse`] if a 2xx body is not JSON of the expected shape.
    /// * [`WeatherDataError::MissingData`] if `forecast.forecastday[0].day.avgtemp_c` is absent.
    pub async fn day_average(
        &self,
        api_key: &str,
        city: &str,
        date: NaiveDate,
    ) -> Result<f64, WeatherDataError> {
        let url = self.history_url();
        let dt = date.format("%Y-%m-%d").to_string();
        debug!("Requesting {} for '{}' on {}", url, city, dt);

        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key), ("q", city), ("dt", dt.as_str())])
            .send()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e.without_url()))?;

        if !status.is_success() {
            warn!("HTTP error for {} on {}: {}", url, dt, status);
            return Err(WeatherDataError::ApiStatus { date, status, body });
        }

        let parsed: HistoryResponse = serde_json::from_str(&body)
            .map_err(|source| WeatherDataError::JsonParse { date, source })?;
        parsed
            .average_temperature()
            .ok_or(WeatherDataError::MissingData { date })
    }
}
