use crate::types::forecast_table::ForecastTable;
use crate::types::historical_table::HistoricalTable;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Everything a chart needs: the observed line, the predicted line and the
/// boundary date where observations end.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedSeries {
    pub city: String,
    pub historical: Vec<SeriesPoint>,
    pub forecast: Vec<SeriesPoint>,
    pub boundary: NaiveDate,
}

impl CombinedSeries {
    /// Returns `None` when `history` is empty, since there is no boundary to mark.
    pub fn compose(city: &str, history: &HistoricalTable, forecast: &ForecastTable) -> Option<Self> {
        let boundary = history.last_date()?;
        Some(Self {
            city: city.to_string(),
            historical: history
                .observations()
                .iter()
                .map(|o| SeriesPoint {
                    date: o.date,
                    value: o.avg_temp_c,
                })
                .collect(),
            forecast: forecast
                .points()
                .iter()
                .map(|p| SeriesPoint {
                    date: p.date,
                    value: p.predicted,
                })
                .collect(),
            boundary,
        })
    }

    /// Predicted points strictly after the boundary date.
    pub fn tail(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.forecast.iter().filter(move |p| p.date > self.boundary)
    }

    /// Lowest and highest value across both lines.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.historical
            .iter()
            .chain(self.forecast.iter())
            .map(|p| p.value)
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
