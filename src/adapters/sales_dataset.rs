use log::{debug, info};
use polars::frame::DataFrame;

use crate::dataset::loader::sales_dataframe_from_csv;
use crate::error::DashboardError;

pub async fn fetch_sales_csv(url: &str) -> Result<Vec<u8>, DashboardError> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let body = response.bytes().await?;
    debug!("Fetched {} bytes from {}", body.len(), url);

    Ok(body.to_vec())
}

/// Single attempt; the caller treats any error as fatal.
pub async fn load_sales_dataset(url: &str) -> Result<DataFrame, DashboardError> {
    let body = fetch_sales_csv(url).await?;
    let df = sales_dataframe_from_csv(&body)?;
    info!("Parsed {} sales records", df.height());

    Ok(df)
}
