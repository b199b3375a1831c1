//! The parts of WeatherAPI's `history.json` responses that we read.

use serde::Deserialize;

/// Longest raw body quoted in error messages.
const MAX_BODY_EXCERPT: usize = 200;

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    forecast: Option<ForecastSection>,
}

#[derive(Debug, Deserialize)]
struct ForecastSection {
    #[serde(default)]
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    day: Option<DaySummary>,
}

#[derive(Debug, Deserialize)]
struct DaySummary {
    avgtemp_c: Option<f64>,
}

impl HistoryResponse {
    /// `forecast.forecastday[0].day.avgtemp_c`, if every step is present.
    pub(crate) fn average_temperature(&self) -> Option<f64> {
        self.forecast
            .as_ref()?
            .forecastday
            .first()?
            .day
            .as_ref()?
            .avgtemp_c
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Human-readable text for an error body: WeatherAPI's `error.message` when the
/// body has that shape, otherwise the (shortened) raw body.
pub(crate) fn api_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error.message;
    }
    let body = body.trim();
    if body.is_empty() {
        return "empty response body".to_string();
    }
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_temperature_present() {
        let body = r#"{"location":{"name":"Astana"},"forecast":{"forecastday":[{"date":"2024-01-01","day":{"maxtemp_c":-10.0,"avgtemp_c":-14.2}}]}}"#;
        let parsed: HistoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.average_temperature(), Some(-14.2));
    }

    #[test]
    fn test_average_temperature_missing_parts() {
        for body in [
            r#"{}"#,
            r#"{"forecast":null}"#,
            r#"{"forecast":{}}"#,
            r#"{"forecast":{"forecastday":[]}}"#,
            r#"{"forecast":{"forecastday":[{}]}}"#,
            r#"{"forecast":{"forecastday":[{"day":{}}]}}"#,
        ] {
            let parsed: HistoryResponse = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.average_temperature(), None, "body: {}", body);
        }
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(
            api_error_message(r#"{"error":{"code":2006,"message":"API key is invalid."}}"#),
            "API key is invalid."
        );
        assert_eq!(api_error_message("  Bad gateway \n"), "Bad gateway");
        assert_eq!(api_error_message(""), "empty response body");
        assert_eq!(api_error_message(&"x".repeat(500)).len(), MAX_BODY_EXCERPT + 3);
    }
}
