use chrono::Datelike;
use polars::prelude::*;

use crate::dataset::models::*;
use crate::error::DashboardError;

// chrono counts days from 0001-01-01, polars dates count from 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub fn parse_sales_csv(bytes: &[u8]) -> Result<Vec<SalesRecord>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    reader
        .deserialize::<SalesRow>()
        .map(|row| -> Result<SalesRecord, DashboardError> { SalesRecord::try_from(row?) })
        .collect()
}

pub fn records_to_dataframe(records: &[SalesRecord]) -> Result<DataFrame, DashboardError> {
    // Create Series for each column
    let date_series = Series::new(
        DATE,
        records
            .iter()
            .map(|r| r.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect::<Vec<i32>>(),
    )
    .cast(&DataType::Date)?;

    let df = DataFrame::new(vec![
        date_series,
        Series::new(YEAR, records.iter().map(|r| r.year).collect::<Vec<i32>>()),
        Series::new(
            MONTH,
            records.iter().map(|r| r.month.as_str()).collect::<Vec<&str>>(),
        ),
        Series::new(
            MONTH_INDEX,
            records.iter().map(|r| r.month_index).collect::<Vec<i32>>(),
        ),
        Series::new(
            RECESSION,
            records.iter().map(|r| r.recession).collect::<Vec<bool>>(),
        ),
        Series::new(
            ADVERTISING_EXPENDITURE,
            records
                .iter()
                .map(|r| r.advertising_expenditure)
                .collect::<Vec<f64>>(),
        ),
        Series::new(
            UNEMPLOYMENT_RATE,
            records
                .iter()
                .map(|r| r.unemployment_rate)
                .collect::<Vec<f64>>(),
        ),
        Series::new(
            AUTOMOBILE_SALES,
            records
                .iter()
                .map(|r| r.automobile_sales)
                .collect::<Vec<f64>>(),
        ),
        Series::new(
            VEHICLE_TYPE,
            records
                .iter()
                .map(|r| r.vehicle_type.as_str())
                .collect::<Vec<&str>>(),
        ),
    ])?;

    Ok(df)
}

pub fn sales_dataframe_from_csv(bytes: &[u8]) -> Result<DataFrame, DashboardError> {
    let records = parse_sales_csv(bytes)?;
    records_to_dataframe(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::SAMPLE_CSV;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_sales_csv() {
        let records = parse_sales_csv(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 7);

        let first = &records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2019, 1, 31).unwrap());
        assert_eq!(first.year, 2019);
        assert_eq!(first.month, "Jan");
        assert_eq!(first.month_index, 1);
        assert!(!first.recession);
        assert_eq!(first.automobile_sales, 400.0);
        assert_eq!(first.vehicle_type, "Supperminicar");

        assert!(records[2].recession);
        assert_eq!(records[5].date, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_sales_csv_missing_column() {
        let csv = "Date,Year,Month,Recession\n1/31/2019,2019,Jan,0\n";

        let result = parse_sales_csv(csv.as_bytes());

        assert!(matches!(result, Err(DashboardError::Csv(_))));
    }

    #[test]
    fn test_parse_sales_csv_bad_recession_flag() {
        let csv = "Date,Year,Month,Recession,Advertising_Expenditure,unemployment_rate,Automobile_Sales,Vehicle_Type\n\
                   1/31/2019,2019,Jan,maybe,1200,3.1,400,Supperminicar\n";

        let result = parse_sales_csv(csv.as_bytes());

        assert!(matches!(result, Err(DashboardError::Csv(_))));
    }

    #[test]
    fn test_parse_sales_csv_bad_date() {
        let csv = "Date,Year,Month,Recession,Advertising_Expenditure,unemployment_rate,Automobile_Sales,Vehicle_Type\n\
                   sometime,2019,Jan,0,1200,3.1,400,Supperminicar\n";

        let result = parse_sales_csv(csv.as_bytes());

        assert!(matches!(result, Err(DashboardError::InvalidDate(_))));
    }

    #[test]
    fn test_records_to_dataframe() {
        let df = sales_dataframe_from_csv(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(df.shape(), (7, 9));
        assert_eq!(df.column(DATE).unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column(RECESSION).unwrap().dtype(), &DataType::Boolean);

        let month_index: Vec<Option<i32>> = df
            .column(MONTH_INDEX)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            month_index,
            vec![Some(1), Some(2), Some(3), Some(7), Some(1), Some(2), Some(3)]
        );
    }
}
