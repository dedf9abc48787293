use log::debug;
use polars::frame::DataFrame;

use crate::api::layout::chart_rows;
use crate::api::models::Component;
use crate::core_logic::aggregations::{
    ad_expenditure_by_vehicle_type, mean_sales_by_vehicle_type, mean_sales_by_year, monthly_sales,
    recession_records, records_for_year,
};
use crate::core_logic::charts::{bar_chart, line_chart, pie_chart, Figure};
use crate::dataset::models::{
    ADVERTISING_EXPENDITURE, AUTOMOBILE_SALES, MONTH, UNEMPLOYMENT_RATE, VEHICLE_TYPE, YEAR,
};
use crate::error::DashboardError;

pub const YEARLY_STATISTICS: &str = "Yearly Statistics";
pub const RECESSION_PERIOD_STATISTICS: &str = "Recession Period Statistics";

const PLOT_BACKGROUND: &str = "#f5f5f5";
const FONT_SIZE: u32 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Yearly,
    RecessionPeriod,
    Unset,
}

impl ReportType {
    /// Exact match on the dropdown value; placeholders and anything else are `Unset`.
    pub fn from_selection(value: &str) -> Self {
        match value {
            YEARLY_STATISTICS => ReportType::Yearly,
            RECESSION_PERIOD_STATISTICS => ReportType::RecessionPeriod,
            _ => ReportType::Unset,
        }
    }
}

pub fn year_selector_disabled(report_type: ReportType) -> bool {
    report_type != ReportType::Yearly
}

/// Charts for the current selection, in rows of two. An empty vector means
/// nothing is shown.
pub fn update_output_container(
    df: &DataFrame,
    report_type: ReportType,
    year: Option<i32>,
) -> Result<Vec<Component>, DashboardError> {
    let figures = match (report_type, year) {
        (ReportType::RecessionPeriod, _) => recession_figures(df)?,
        (ReportType::Yearly, Some(year)) => yearly_figures(df, year)?,
        _ => return Ok(Vec::new()),
    };

    debug!(
        "Rendering {:?}",
        figures.iter().map(Figure::title).collect::<Vec<&str>>()
    );
    Ok(chart_rows(figures))
}

pub fn recession_figures(df: &DataFrame) -> Result<Vec<Figure>, DashboardError> {
    let recession_data = recession_records(df)?;

    let sales_by_year = mean_sales_by_year(&recession_data)?;
    let fig_line = line_chart(
        &sales_by_year,
        YEAR,
        AUTOMOBILE_SALES,
        "Automobile Sales Over Recession Period (Year Wise)",
    )?
    .with_mode("lines+markers")
    .with_plot_bgcolor(PLOT_BACKGROUND)
    .with_font_size(FONT_SIZE)
    .with_title_x(0.45);

    let sales_by_vehicle = mean_sales_by_vehicle_type(&recession_data)?;
    let fig_bar = bar_chart(
        &sales_by_vehicle,
        VEHICLE_TYPE,
        AUTOMOBILE_SALES,
        Some(VEHICLE_TYPE),
        "Average number of vehicles sold by vehicle type",
    )?
    .with_plot_bgcolor(PLOT_BACKGROUND)
    .with_font_size(FONT_SIZE);

    let expenditure = ad_expenditure_by_vehicle_type(&recession_data)?;
    let fig_pie = pie_chart(
        &expenditure,
        VEHICLE_TYPE,
        ADVERTISING_EXPENDITURE,
        "Total expenditure share by vehicle type during recessions",
    )?;

    // Unaggregated: one bar per recession record
    let fig_unemployment = bar_chart(
        &recession_data,
        UNEMPLOYMENT_RATE,
        AUTOMOBILE_SALES,
        Some(VEHICLE_TYPE),
        "Effect of Unemployment Rate on Vehicle Type and Sales",
    )?;

    Ok(vec![fig_line, fig_bar, fig_pie, fig_unemployment])
}

/// Charts 1 and 2 always cover every year; charts 3 and 4 only `year`.
pub fn yearly_figures(df: &DataFrame, year: i32) -> Result<Vec<Figure>, DashboardError> {
    let yearly_data = records_for_year(df, year)?;

    let sales_by_year = mean_sales_by_year(df)?;
    let fig_years = line_chart(
        &sales_by_year,
        YEAR,
        AUTOMOBILE_SALES,
        "Yearly Automobile Sales",
    )?;

    let sales_by_month = monthly_sales(df)?;
    let fig_months = line_chart(
        &sales_by_month,
        MONTH,
        AUTOMOBILE_SALES,
        "Total Monthly Automobile Sales",
    )?;

    let sales_by_vehicle = mean_sales_by_vehicle_type(&yearly_data)?;
    let fig_vehicles = bar_chart(
        &sales_by_vehicle,
        VEHICLE_TYPE,
        AUTOMOBILE_SALES,
        None,
        format!("Average Vehicles Sold by Vehicle Type in the {}", year),
    )?;

    let expenditure = ad_expenditure_by_vehicle_type(&yearly_data)?;
    let fig_expenditure = pie_chart(
        &expenditure,
        VEHICLE_TYPE,
        ADVERTISING_EXPENDITURE,
        "Total Advertisement Expenditure for Each Vehicle",
    )?;

    Ok(vec![fig_years, fig_months, fig_vehicles, fig_expenditure])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample_dataframe;
    use serde_json::{json, Value};

    fn figures_of(rows: &[Component]) -> Vec<Figure> {
        let mut figures = Vec::new();
        for row in rows {
            if let Component::Div { children, .. } = row {
                for cell in children {
                    if let Component::Div { children, .. } = cell {
                        for graph in children {
                            if let Component::Graph { figure } = graph {
                                figures.push(figure.clone());
                            }
                        }
                    }
                }
            }
        }
        figures
    }

    #[test]
    fn test_year_selector_disabled() {
        assert!(!year_selector_disabled(ReportType::from_selection("Yearly Statistics")));
        assert!(year_selector_disabled(ReportType::from_selection(
            "Recession Period Statistics"
        )));
        assert!(year_selector_disabled(ReportType::from_selection("Select Statistics")));
        assert!(year_selector_disabled(ReportType::from_selection("yearly statistics")));
        assert!(year_selector_disabled(ReportType::Unset));
    }

    #[test]
    fn test_unset_report_type_is_empty() {
        let df = sample_dataframe();

        assert!(update_output_container(&df, ReportType::Unset, None)
            .unwrap()
            .is_empty());
        assert!(update_output_container(&df, ReportType::Unset, Some(2019))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_yearly_without_year_is_empty() {
        let df = sample_dataframe();

        let rows = update_output_container(&df, ReportType::Yearly, None).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_recession_report_ignores_year() {
        let df = sample_dataframe();

        let without_year = update_output_container(&df, ReportType::RecessionPeriod, None).unwrap();
        let with_year =
            update_output_container(&df, ReportType::RecessionPeriod, Some(2019)).unwrap();

        assert_eq!(without_year.len(), 2);
        assert_eq!(without_year, with_year);
    }

    #[test]
    fn test_recession_report_uses_recession_rows() {
        let df = sample_dataframe();

        let rows = update_output_container(&df, ReportType::RecessionPeriod, None).unwrap();
        let figures = figures_of(&rows);

        assert_eq!(figures.len(), 4);
        assert_eq!(
            figures[0].title(),
            "Automobile Sales Over Recession Period (Year Wise)"
        );
        assert_eq!(figures[0].data[0].mode.as_deref(), Some("lines+markers"));
        assert_eq!(figures[0].layout.title.x, Some(0.45));
        assert_eq!(figures[0].data[0].y, Some(vec![json!(200.0), json!(200.0)]));

        let bar_names: Vec<_> = figures[1]
            .data
            .iter()
            .map(|trace| trace.name.clone().unwrap())
            .collect();
        assert_eq!(bar_names, vec!["Executivecar", "Supperminicar"]);

        assert_eq!(figures[2].data[0].values, Some(vec![json!(700.0), json!(1700.0)]));

        // Three recession records spread over the colored traces
        let bars: usize = figures[3]
            .data
            .iter()
            .map(|trace| trace.x.as_ref().map_or(0, Vec::len))
            .sum();
        assert_eq!(bars, 3);
    }

    #[test]
    fn test_yearly_report_for_2019() {
        let df = sample_dataframe();

        let rows = update_output_container(&df, ReportType::Yearly, Some(2019)).unwrap();
        let figures = figures_of(&rows);

        assert_eq!(rows.len(), 2);
        assert_eq!(figures.len(), 4);

        // Chart 1 spans every year
        assert_eq!(figures[0].data[0].x, Some(vec![json!(2019), json!(2020)]));

        // Chart 2 in calendar order
        assert_eq!(
            figures[1].data[0].x,
            Some(vec![json!("Jan"), json!("Feb"), json!("Mar"), json!("Jul")])
        );

        // Charts 3 and 4 only see 2019
        assert!(figures[2].title().contains("2019"));
        assert_eq!(figures[2].data[0].y, Some(vec![json!(550.0), json!(300.0)]));
        assert_eq!(
            figures[3].data[0].values,
            Some(vec![json!(2600.0), json!(2100.0)])
        );
    }

    #[test]
    fn test_yearly_overview_independent_of_year() {
        let df = sample_dataframe();

        let first = yearly_figures(&df, 2019).unwrap();
        let second = yearly_figures(&df, 2020).unwrap();

        assert_eq!(first[0], second[0]);
        assert_eq!(first[1], second[1]);
        assert_ne!(first[2], second[2]);
        assert_eq!(
            second[2].title(),
            "Average Vehicles Sold by Vehicle Type in the 2020"
        );
    }

    #[test]
    fn test_rows_hold_two_graphs() {
        let df = sample_dataframe();

        let rows = update_output_container(&df, ReportType::Yearly, Some(2020)).unwrap();

        for row in serde_json::to_value(&rows).unwrap().as_array().unwrap() {
            assert_eq!(row["className"], "chart-item");
            assert_eq!(row["style"]["display"], "flex");
            let cells: &Vec<Value> = row["children"].as_array().unwrap();
            assert_eq!(cells.len(), 2);
            assert_eq!(cells[0]["children"][0]["type"], "Graph");
        }
    }
}
