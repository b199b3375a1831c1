//! Chart of observed and predicted temperatures, shown in the browser through plotlars.

use crate::forecaster::FORM_DATE_FORMAT;
use crate::types::combined_series::CombinedSeries;
use chrono::NaiveDate;
use plotlars::{Legend, Line, Plot, Rgb, Shape, Text, TimeSeriesPlot};
use polars::prelude::*;
use std::collections::BTreeMap;

pub const DATE_LABEL_COLUMN: &str = "Date";
pub const HISTORICAL_SERIES: &str = "Historical";
pub const FORECAST_SERIES: &str = "Forecast";
pub const BOUNDARY_SERIES: &str = "Forecast start";

/// Padding around a flat series so the boundary marker stays visible.
const FLAT_RANGE_PADDING: f64 = 0.5;

/// Lays `series` out as one row per date plus two closing rows for the boundary marker.
///
/// Dates become `DD-MM-YYYY` labels. `Historical` is null after the boundary
/// and `Forecast` is null where the model gave no value. The two closing
/// rows repeat the boundary label with the lowest and highest value in
/// `Forecast start`, which draws a vertical segment across the plot.
pub fn chart_frame(series: &CombinedSeries) -> PolarsResult<DataFrame> {
    let mut rows: BTreeMap<NaiveDate, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for point in &series.historical {
        rows.entry(point.date).or_default().0 = Some(point.value);
    }
    for point in &series.forecast {
        rows.entry(point.date).or_default().1 = Some(point.value);
    }

    let mut labels: Vec<String> = Vec::with_capacity(rows.len() + 2);
    let mut historical: Vec<Option<f64>> = Vec::with_capacity(rows.len() + 2);
    let mut forecast: Vec<Option<f64>> = Vec::with_capacity(rows.len() + 2);
    let mut boundary: Vec<Option<f64>> = Vec::with_capacity(rows.len() + 2);

    for (date, (observed, predicted)) in rows {
        labels.push(date.format(FORM_DATE_FORMAT).to_string());
        historical.push(observed);
        forecast.push(predicted);
        boundary.push(None);
    }

    if let Some((low, high)) = series.value_range() {
        let (low, high) = if low == high {
            (low - FLAT_RANGE_PADDING, high + FLAT_RANGE_PADDING)
        } else {
            (low, high)
        };
        let boundary_label = series.boundary.format(FORM_DATE_FORMAT).to_string();
        for value in [low, high] {
            labels.push(boundary_label.clone());
            historical.push(None);
            forecast.push(None);
            boundary.push(Some(value));
        }
    }

    DataFrame::new(vec![
        Column::new(DATE_LABEL_COLUMN.into(), labels),
        Column::new(HISTORICAL_SERIES.into(), historical),
        Column::new(FORECAST_SERIES.into(), forecast),
        Column::new(BOUNDARY_SERIES.into(), boundary),
    ])
}

/// Opens the chart for `series` in the default browser.
pub fn render(series: &CombinedSeries) -> PolarsResult<()> {
    let frame = chart_frame(series)?;
    let title = format!("Temperature forecast for {}", series.city);
    TimeSeriesPlot::builder()
        .data(&frame)
        .x(DATE_LABEL_COLUMN)
        .y(HISTORICAL_SERIES)
        .additional_series(vec![FORECAST_SERIES, BOUNDARY_SERIES])
        .size(6)
        .colors(vec![Rgb(69, 157, 230), Rgb(235, 117, 0), Rgb(120, 120, 120)])
        .lines(vec![Line::Solid, Line::Dash, Line::Dot])
        .with_shape(true)
        .shapes(vec![Shape::Circle, Shape::Square, Shape::Square])
        .plot_title(Text::from(title.as_str()).size(18))
        .legend(&Legend::new().x(0.05).y(0.95))
        .x_title("Date")
        .y_title("Temperature (°C)")
        .build()
        .plot();
    Ok(())
}
