use crate::error::ForecastError;
use crate::model::MAX_FORECAST_DAYS;
use crate::types::form::{FormField, FormInput};
use chrono::NaiveDate;

/// Day-month-year, as typed into the form.
pub const FORM_DATE_FORMAT: &str = "%d-%m-%Y";

/// A form submission after parsing. Field-level checks have passed; the
/// date order has not been checked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ForecastRequest {
    pub city: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub forecast_days: usize,
    pub api_key: String,
}

impl ForecastRequest {
    /// Parses every field in form order and stops at the first invalid one.
    pub(crate) fn parse(input: &FormInput) -> Result<Self, ForecastError> {
        let city = non_empty(input, FormField::City)?;
        let start = parse_date(input, FormField::StartDate)?;
        let end = parse_date(input, FormField::EndDate)?;
        let forecast_days = parse_horizon(input)?;
        let api_key = non_empty(input, FormField::ApiKey)?;

        Ok(Self {
            city,
            start,
            end,
            forecast_days,
            api_key,
        })
    }

    pub(crate) fn ensure_ordered(&self) -> Result<(), ForecastError> {
        if self.start > self.end {
            return Err(ForecastError::validation(
                FormField::EndDate,
                format!(
                    "start must precede end ({} is after {})",
                    self.start.format(FORM_DATE_FORMAT),
                    self.end.format(FORM_DATE_FORMAT)
                ),
            ));
        }
        Ok(())
    }

    /// Number of days in `start..=end`.
    pub(crate) fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn non_empty(input: &FormInput, field: FormField) -> Result<String, ForecastError> {
    let value = input.value(field).trim();
    if value.is_empty() {
        return Err(ForecastError::validation(field, "must not be empty"));
    }
    Ok(value.to_string())
}

fn parse_date(input: &FormInput, field: FormField) -> Result<NaiveDate, ForecastError> {
    let text = input.value(field).trim();
    NaiveDate::parse_from_str(text, FORM_DATE_FORMAT).map_err(|e| {
        ForecastError::validation(field, format!("'{}' is not a DD-MM-YYYY date ({})", text, e))
    })
}

fn parse_horizon(input: &FormInput) -> Result<usize, ForecastError> {
    let text = input.forecast_days.trim();
    let days: usize = text.parse().map_err(|_| {
        ForecastError::validation(
            FormField::ForecastDays,
            format!("'{}' is not a whole number", text),
        )
    })?;
    if days == 0 {
        return Err(ForecastError::validation(
            FormField::ForecastDays,
            "must be at least 1",
        ));
    }
    if days > MAX_FORECAST_DAYS {
        return Err(ForecastError::validation(
            FormField::ForecastDays,
            format!("must be at most {}", MAX_FORECAST_DAYS),
        ));
    }
    Ok(days)
}
