use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataframe operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("invalid date `{0}`")]
    InvalidDate(String),

    #[error("column `{0}` not found")]
    ColumnNotFound(String),

    #[error("no callback registered for output `{0}`")]
    UnknownOutput(String),

    #[error("failed to serialize callback output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
