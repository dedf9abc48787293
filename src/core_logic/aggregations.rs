use polars::prelude::*;

use crate::dataset::models::{
    ADVERTISING_EXPENDITURE, AUTOMOBILE_SALES, MONTH, MONTH_INDEX, RECESSION, VEHICLE_TYPE, YEAR,
};
use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Mean,
    Sum,
}

/// Groups `df` by `keys`, reduces `value` and sorts by `sort_by`.
/// The reduced column keeps the name `value`; `df` itself is never modified.
pub fn group_and_reduce(
    df: &DataFrame,
    keys: &[&str],
    value: &str,
    reduction: Reduction,
    sort_by: &str,
) -> Result<DataFrame, DashboardError> {
    let value_expr = match reduction {
        Reduction::Mean => col(value).mean(),
        Reduction::Sum => col(value).sum(),
    };

    let summary = df
        .clone()
        .lazy()
        .group_by(keys.iter().map(|key| col(key)).collect::<Vec<Expr>>())
        .agg(vec![value_expr.alias(value)])
        .sort(sort_by, Default::default())
        .collect()?;

    Ok(summary)
}

pub fn recession_records(df: &DataFrame) -> Result<DataFrame, DashboardError> {
    Ok(df.clone().lazy().filter(col(RECESSION)).collect()?)
}

pub fn records_for_year(df: &DataFrame, year: i32) -> Result<DataFrame, DashboardError> {
    Ok(df
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(year)))
        .collect()?)
}

pub fn mean_sales_by_year(df: &DataFrame) -> Result<DataFrame, DashboardError> {
    group_and_reduce(df, &[YEAR], AUTOMOBILE_SALES, Reduction::Mean, YEAR)
}

pub fn mean_sales_by_vehicle_type(df: &DataFrame) -> Result<DataFrame, DashboardError> {
    group_and_reduce(
        df,
        &[VEHICLE_TYPE],
        AUTOMOBILE_SALES,
        Reduction::Mean,
        VEHICLE_TYPE,
    )
}

pub fn ad_expenditure_by_vehicle_type(df: &DataFrame) -> Result<DataFrame, DashboardError> {
    group_and_reduce(
        df,
        &[VEHICLE_TYPE],
        ADVERTISING_EXPENDITURE,
        Reduction::Sum,
        VEHICLE_TYPE,
    )
}

/// Total sales per month across all years, in calendar order.
pub fn monthly_sales(df: &DataFrame) -> Result<DataFrame, DashboardError> {
    group_and_reduce(
        df,
        &[MONTH, MONTH_INDEX],
        AUTOMOBILE_SALES,
        Reduction::Sum,
        MONTH_INDEX,
    )
}

/// Distinct years in order of first appearance.
pub fn distinct_years(df: &DataFrame) -> Result<Vec<i32>, DashboardError> {
    let mut years: Vec<i32> = Vec::new();
    for year in df.column(YEAR)?.i32()?.into_iter().flatten() {
        if !years.contains(&year) {
            years.push(year);
        }
    }

    Ok(years)
}
