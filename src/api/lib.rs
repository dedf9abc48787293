use crate::core_logic::controller::ReportType;
use serde_json::Value;

pub fn report_type_from_value(value: Option<&Value>) -> ReportType {
    match value.and_then(Value::as_str) {
        Some(selection) => ReportType::from_selection(selection),
        None => ReportType::Unset,
    }
}

/// A year is only selected once the dropdown holds an integer; the
/// placeholder string and null both mean "no year".
pub fn year_from_value(value: Option<&Value>) -> Option<i32> {
    value
        .and_then(Value::as_i64)
        .and_then(|year| i32::try_from(year).ok())
}
