use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::DashboardError;

pub const DATE: &str = "Date";
pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const MONTH_INDEX: &str = "MonthN";
pub const RECESSION: &str = "Recession";
pub const ADVERTISING_EXPENDITURE: &str = "Advertising_Expenditure";
pub const UNEMPLOYMENT_RATE: &str = "unemployment_rate";
pub const AUTOMOBILE_SALES: &str = "Automobile_Sales";
pub const VEHICLE_TYPE: &str = "Vehicle_Type";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the sales CSV as it arrives over the wire. Columns not named
/// here (price, GDP, city, ...) are skipped by the reader.
#[derive(Deserialize, Debug, Clone)]
pub struct SalesRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Recession", deserialize_with = "deserialize_flag")]
    pub recession: bool,
    #[serde(rename = "Advertising_Expenditure")]
    pub advertising_expenditure: f64,
    #[serde(rename = "unemployment_rate")]
    pub unemployment_rate: f64,
    #[serde(rename = "Automobile_Sales")]
    pub automobile_sales: f64,
    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub month: String,
    pub month_index: i32, // 1..=12, taken from `date`
    pub recession: bool,
    pub advertising_expenditure: f64,
    pub unemployment_rate: f64,
    pub automobile_sales: f64,
    pub vehicle_type: String,
}

impl TryFrom<SalesRow> for SalesRecord {
    type Error = DashboardError;

    fn try_from(row: SalesRow) -> Result<Self, Self::Error> {
        let date = parse_date(&row.date)?;

        Ok(SalesRecord {
            date,
            year: row.year,
            month: row.month,
            month_index: date.month() as i32,
            recession: row.recession,
            advertising_expenditure: row.advertising_expenditure,
            unemployment_rate: row.unemployment_rate,
            automobile_sales: row.automobile_sales,
            vehicle_type: row.vehicle_type,
        })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, DashboardError> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
                .ok()
                .map(|datetime| datetime.date())
        })
        .ok_or_else(|| DashboardError::InvalidDate(raw.to_string()))
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "1" | "1.0" | "true" | "True" => Ok(true),
        "0" | "0.0" | "false" | "False" => Ok(false),
        other => Err(de::Error::custom(format!(
            "invalid recession flag `{}`",
            other
        ))),
    }
}
