use serde_json::Value;

use crate::api::models::{style, Component, DropdownOption, Style};
use crate::core_logic::charts::Figure;
use crate::core_logic::controller::{RECESSION_PERIOD_STATISTICS, YEARLY_STATISTICS};

pub const DASHBOARD_TITLE: &str = "Automobile Sales Statistics Dashboard";

pub const REPORT_TYPE_ID: &str = "dropdown-statistics";
pub const YEAR_ID: &str = "select-year";
pub const OUTPUT_ID: &str = "output-container";

pub const REPORT_TYPE_PLACEHOLDER: &str = "Select a report type";
pub const REPORT_TYPE_INITIAL: &str = "Select Statistics";
pub const YEAR_PLACEHOLDER: &str = "Select Year";

fn dropdown_container_style() -> Style {
    style(&[
        ("width", "80%"),
        ("margin-left", "auto"),
        ("margin-right", "auto"),
        ("padding-bottom", "10px"),
    ])
}

fn dropdown_style() -> Style {
    style(&[
        ("width", "100%"),
        ("padding", "3px"),
        ("font-size", "20px"),
        ("text-align-last", "center"),
    ])
}

fn container(children: Vec<Component>, style: Style) -> Component {
    Component::Div {
        id: None,
        class_name: None,
        style,
        children,
    }
}

/// The static page: title, report type and year dropdowns, and the empty
/// output region the report callback fills in.
pub fn app_layout(years: &[i32]) -> Component {
    let report_types = [YEARLY_STATISTICS, RECESSION_PERIOD_STATISTICS]
        .iter()
        .map(|label| DropdownOption {
            label: label.to_string(),
            value: Value::from(*label),
        })
        .collect();

    let year_options = years
        .iter()
        .map(|year| DropdownOption {
            label: year.to_string(),
            value: Value::from(*year),
        })
        .collect();

    container(
        vec![
            Component::H1 {
                text: DASHBOARD_TITLE.to_string(),
                style: style(&[
                    ("textAlign", "center"),
                    ("color", "#503D36"),
                    ("fontSize", "24px"),
                ]),
            },
            container(
                vec![Component::Dropdown {
                    id: REPORT_TYPE_ID.to_string(),
                    options: report_types,
                    placeholder: REPORT_TYPE_PLACEHOLDER.to_string(),
                    value: Value::from(REPORT_TYPE_INITIAL),
                    disabled: false,
                    style: dropdown_style(),
                }],
                dropdown_container_style(),
            ),
            container(
                vec![Component::Dropdown {
                    id: YEAR_ID.to_string(),
                    options: year_options,
                    placeholder: YEAR_PLACEHOLDER.to_string(),
                    value: Value::from(YEAR_PLACEHOLDER),
                    disabled: true,
                    style: dropdown_style(),
                }],
                dropdown_container_style(),
            ),
            container(
                vec![Component::Div {
                    id: Some(OUTPUT_ID.to_string()),
                    class_name: Some("chart-grid".to_string()),
                    style: style(&[
                        ("display", "flex"),
                        ("flex-direction", "column"),
                        ("align-items", "center"),
                    ]),
                    children: Vec::new(),
                }],
                Style::new(),
            ),
        ],
        Style::new(),
    )
}

/// Lays figures out in rows of two.
pub fn chart_rows(figures: Vec<Figure>) -> Vec<Component> {
    let mut rows = Vec::new();
    let mut figures = figures.into_iter().peekable();

    while figures.peek().is_some() {
        let cells = figures
            .by_ref()
            .take(2)
            .map(|figure| container(vec![Component::Graph { figure }], Style::new()))
            .collect();

        rows.push(Component::Div {
            id: None,
            class_name: Some("chart-item".to_string()),
            style: style(&[("display", "flex")]),
            children: cells,
        });
    }

    rows
}
