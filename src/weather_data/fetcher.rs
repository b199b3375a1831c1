use crate::types::historical_table::{DailyObservation, HistoricalTable};
use crate::weather_data::client::{WeatherApiClient, WeatherApiConfig};
use crate::weather_data::error::WeatherDataError;
use bon::bon;
use chrono::NaiveDate;
use log::info;
use tokio::sync::mpsc::UnboundedSender;

/// Sent after each successfully fetched day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProgress {
    pub date: NaiveDate,
    pub done: usize,
    pub total: usize,
}

/// Builds a [`HistoricalTable`] by asking the weather API for one day at a time.
///
/// Requests are issued sequentially in date order. The first failing day
/// aborts the whole range: days already fetched are dropped and later days
/// are never requested. Nothing is retried.
pub struct WeatherFetcher {
    client: WeatherApiClient,
    progress: Option<UnboundedSender<FetchProgress>>,
}

#[bon]
impl WeatherFetcher {
    /// Creates a fetcher.
    ///
    /// * `.config(WeatherApiConfig)`: optional, defaults to [`WeatherApiConfig::default`].
    /// * `.progress(UnboundedSender<FetchProgress>)`: optional channel that receives
    ///   a [`FetchProgress`] after every fetched day.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tempcast::{WeatherApiConfig, WeatherFetcher};
    ///
    /// # fn main() -> Result<(), tempcast::WeatherDataError> {
    /// let fetcher = WeatherFetcher::builder()
    ///     .config(WeatherApiConfig { timeout_secs: 10, ..Default::default() })
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(
        config: Option<WeatherApiConfig>,
        progress: Option<UnboundedSender<FetchProgress>>,
    ) -> Result<Self, WeatherDataError> {
        let client = WeatherApiClient::new(config.unwrap_or_default())?;
        Ok(Self { client, progress })
    }

    /// Fetches the average temperature for every day in `start..=end`.
    ///
    /// The caller ensures `start <= end`; a reversed range yields an empty table.
    pub async fn fetch(
        &self,
        api_key: &str,
        city: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalTable, WeatherDataError> {
        let total = usize::try_from((end - start).num_days() + 1).unwrap_or(0);
        let mut observations = Vec::with_capacity(total);

        for date in start.iter_days().take_while(|d| *d <= end) {
            let avg_temp_c = self.client.day_average(api_key, city, date).await?;
            info!("Fetched {} for '{}': {:.1} °C", date, city, avg_temp_c);
            observations.push(DailyObservation { date, avg_temp_c });

            if let Some(progress) = &self.progress {
                // A dropped receiver only means nobody is watching.
                let _ = progress.send(FetchProgress {
                    date,
                    done: observations.len(),
                    total,
                });
            }
        }

        Ok(HistoricalTable::new(observations)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn history_body(avg: f64) -> serde_json::Value {
        json!({
            "location": { "name": "Astana", "country": "Kazakhstan" },
            "forecast": {
                "forecastday": [
                    { "date": "2024-01-01", "day": { "maxtemp_c": avg + 3.0, "mintemp_c": avg - 3.0, "avgtemp_c": avg } }
                ]
            }
        })
    }

    async fn mount_day(server: &MockServer, dt: &str, response: ResponseTemplate, calls: u64) {
        Mock::given(method("GET"))
            .and(path("/history.json"))
            .and(query_param("dt", dt))
            .respond_with(response)
            .expect(calls)
            .mount(server)
            .await;
    }

    fn fetcher_for(server: &MockServer) -> Result<WeatherFetcher, WeatherDataError> {
        WeatherFetcher::builder()
            .config(WeatherApiConfig {
                base_url: server.uri(),
                timeout_secs: 5,
            })
            .build()
    }

    #[tokio::test]
    async fn test_fetch_one_observation_per_day() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        for (dt, avg) in [("2024-01-01", 1.0), ("2024-01-02", 2.0), ("2024-01-03", 3.0)] {
            Mock::given(method("GET"))
                .and(path("/history.json"))
                .and(query_param("key", "test-key"))
                .and(query_param("q", "Astana"))
                .and(query_param("dt", dt))
                .respond_with(ResponseTemplate::new(200).set_body_json(history_body(avg)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let table = fetcher_for(&server)?
            .fetch("test-key", "Astana", day(1), day(3))
            .await?;

        let observed: Vec<(NaiveDate, f64)> = table
            .observations()
            .iter()
            .map(|o| (o.date, o.avg_temp_c))
            .collect();
        assert_eq!(observed, vec![(day(1), 1.0), (day(2), 2.0), (day(3), 3.0)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_single_day_range() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        mount_day(
            &server,
            "2024-01-05",
            ResponseTemplate::new(200).set_body_json(history_body(-7.5)),
            1,
        )
        .await;

        let table = fetcher_for(&server)?.fetch("k", "Astana", day(5), day(5)).await?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.last_date(), Some(day(5)));
        Ok(())
    }

    #[tokio::test]
    async fn test_api_error_aborts_remaining_days() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        mount_day(&server, "2024-01-01", ResponseTemplate::new(200).set_body_json(history_body(1.0)), 1).await;
        mount_day(
            &server,
            "2024-01-02",
            ResponseTemplate::new(401).set_body_json(json!({
                "error": { "code": 2006, "message": "API key is invalid." }
            })),
            1,
        )
        .await;
        mount_day(&server, "2024-01-03", ResponseTemplate::new(200).set_body_json(history_body(3.0)), 0).await;

        let result = fetcher_for(&server)?.fetch("bad-key", "Astana", day(1), day(3)).await;

        match &result {
            Err(WeatherDataError::ApiStatus { date, status, body }) => {
                assert_eq!(*date, day(2));
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("API key is invalid."));
            }
            other => panic!("expected ApiStatus, got {:?}", other),
        }
        let message = result.unwrap_err().to_string();
        assert!(message.contains("401"), "{}", message);
        assert!(message.ends_with("API key is invalid."), "{}", message);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_forecast_structure() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        mount_day(
            &server,
            "2024-01-01",
            ResponseTemplate::new(200).set_body_json(json!({ "location": { "name": "Astana" } })),
            1,
        )
        .await;
        mount_day(&server, "2024-01-02", ResponseTemplate::new(200).set_body_json(history_body(2.0)), 0).await;

        let result = fetcher_for(&server)?.fetch("k", "Astana", day(1), day(2)).await;
        assert!(matches!(result, Err(WeatherDataError::MissingData { date }) if date == day(1)));
        Ok(())
    }

    #[tokio::test]
    async fn test_non_json_success_body() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        mount_day(&server, "2024-01-01", ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"), 1).await;

        let result = fetcher_for(&server)?.fetch("k", "Astana", day(1), day(1)).await;
        assert!(matches!(result, Err(WeatherDataError::JsonParse { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_progress_reported_per_day() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        mount_day(&server, "2024-01-01", ResponseTemplate::new(200).set_body_json(history_body(1.0)), 1).await;
        mount_day(&server, "2024-01-02", ResponseTemplate::new(200).set_body_json(history_body(2.0)), 1).await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let fetcher = WeatherFetcher::builder()
            .config(WeatherApiConfig {
                base_url: server.uri(),
                timeout_secs: 5,
            })
            .progress(tx)
            .build()?;
        fetcher.fetch("k", "Astana", day(1), day(2)).await?;

        assert_eq!(
            rx.recv().await,
            Some(FetchProgress { date: day(1), done: 1, total: 2 })
        );
        assert_eq!(
            rx.recv().await,
            Some(FetchProgress { date: day(2), done: 2, total: 2 })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reversed_range_is_empty() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(history_body(0.0)))
            .expect(0)
            .mount(&server)
            .await;

        let table = fetcher_for(&server)?.fetch("k", "Astana", day(3), day(1)).await?;
        assert!(table.is_empty());
        Ok(())
    }
}
