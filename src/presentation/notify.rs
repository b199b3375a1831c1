use crate::error::ForecastError;
use crate::forecaster::{ForecastRun, FORM_DATE_FORMAT};
use std::error::Error;
use std::io::{self, Write};

/// Writes one notification block for a failed run: the error kind, the
/// message and every underlying cause.
pub fn show_error<W: Write>(out: &mut W, error: &ForecastError) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}: {}", error.kind(), error)?;
    let mut cause = error.source();
    while let Some(inner) = cause {
        writeln!(out, "  caused by: {}", inner)?;
        cause = inner.source();
    }
    Ok(())
}

/// Lists the predicted days after the boundary, with intervals when known.
pub fn show_forecast<W: Write>(out: &mut W, run: &ForecastRun) -> io::Result<()> {
    let boundary = run.combined.boundary;
    writeln!(out)?;
    writeln!(
        out,
        "Forecast for {} ({} days after {}):",
        run.city,
        run.forecast_days,
        boundary.format(FORM_DATE_FORMAT)
    )?;
    for point in run.forecast.points().iter().filter(|p| p.date > boundary) {
        write!(
            out,
            "  {}  {:>6.1} °C",
            point.date.format(FORM_DATE_FORMAT),
            point.predicted
        )?;
        if let (Some(lower), Some(upper)) = (point.lower, point.upper) {
            write!(out, "  ({:.1} to {:.1})", lower, upper)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
