//! The raw values typed into the forecast form.

use std::fmt;

/// One of the five inputs on the forecast form.
///
/// Used to name the offending input in validation errors and to label the
/// prompts of [`crate::InputForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    City,
    StartDate,
    EndDate,
    ForecastDays,
    ApiKey,
}

impl FormField {
    /// All fields, in the order the form asks for them.
    pub const ALL: [FormField; 5] = [
        FormField::City,
        FormField::StartDate,
        FormField::EndDate,
        FormField::ForecastDays,
        FormField::ApiKey,
    ];

    /// Prompt text shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::City => "City",
            FormField::StartDate => "Start date (DD-MM-YYYY)",
            FormField::EndDate => "End date (DD-MM-YYYY)",
            FormField::ForecastDays => "Forecast days",
            FormField::ApiKey => "API key",
        }
    }
}

/// Formats the field the way error messages refer to it, e.g. `forecast days`.
impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::City => "city",
            FormField::StartDate => "start date",
            FormField::EndDate => "end date",
            FormField::ForecastDays => "forecast days",
            FormField::ApiKey => "API key",
        };
        write!(f, "{}", name)
    }
}

/// Unvalidated text of a form submission, passed by value into
/// [`crate::Forecaster::run`].
///
/// Dates are expected as `DD-MM-YYYY` and the horizon as a positive whole number,
/// but nothing is checked until the forecaster parses it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub forecast_days: String,
    pub api_key: String,
}

impl FormInput {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::City => &self.city,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
            FormField::ForecastDays => &self.forecast_days,
            FormField::ApiKey => &self.api_key,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::City => &mut self.city,
            FormField::StartDate => &mut self.start_date,
            FormField::EndDate => &mut self.end_date,
            FormField::ForecastDays => &mut self.forecast_days,
            FormField::ApiKey => &mut self.api_key,
        }
    }
}
