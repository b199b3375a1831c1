use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Cannot fit a model on an empty series")]
    EmptyHistory,

    #[error("Column '{column}' has no value at row {row}")]
    NullValue { column: &'static str, row: usize },

    #[error("Cannot predict {periods} days ahead, the limit is {max}")]
    HorizonTooLarge { periods: usize, max: usize },

    #[error("Model fitting failed: {0}")]
    Fit(String),

    #[error("Model prediction failed: {0}")]
    Predict(String),

    #[error("Failed processing model frame")]
    Frame(#[from] PolarsError),
}
