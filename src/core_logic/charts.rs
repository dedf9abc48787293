//! Declarative chart descriptions, serialized in the shape Plotly.js expects
//! for `Plotly.newPlot(element, figure.data, figure.layout)`.

use polars::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::dataset::models::{AUTOMOBILE_SALES, MONTH, UNEMPLOYMENT_RATE, VEHICLE_TYPE, YEAR};
use crate::error::DashboardError;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
    Pie,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

impl Trace {
    fn new(kind: TraceKind) -> Self {
        Trace {
            kind,
            name: None,
            legendgroup: None,
            showlegend: None,
            mode: None,
            x: None,
            y: None,
            labels: None,
            values: None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Axis {
    pub title: Text,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: Text,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Font {
    pub size: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl FigureLayout {
    fn titled(title: impl Into<String>) -> Self {
        FigureLayout {
            title: Title {
                text: title.into(),
                x: None,
            },
            xaxis: None,
            yaxis: None,
            legend: None,
            barmode: None,
            plot_bgcolor: None,
            font: None,
        }
    }

    fn with_axes(mut self, x: &str, y: &str) -> Self {
        self.xaxis = Some(Axis {
            title: Text {
                text: axis_label(x).to_string(),
            },
        });
        self.yaxis = Some(Axis {
            title: Text {
                text: axis_label(y).to_string(),
            },
        });
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Sets the drawing mode (`lines`, `markers`, `lines+markers`) on every trace.
    pub fn with_mode(mut self, mode: &str) -> Self {
        for trace in &mut self.data {
            trace.mode = Some(mode.to_string());
        }
        self
    }

    pub fn with_plot_bgcolor(mut self, color: &str) -> Self {
        self.layout.plot_bgcolor = Some(color.to_string());
        self
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.layout.font = Some(Font { size });
        self
    }

    pub fn with_title_x(mut self, x: f64) -> Self {
        self.layout.title.x = Some(x);
        self
    }
}

/// Human readable label for a dataset column, falling back to the column name.
pub fn axis_label(column: &str) -> &str {
    match column {
        YEAR => "Year",
        MONTH => "Month",
        AUTOMOBILE_SALES => "Automobile Sales",
        VEHICLE_TYPE => "Vehicle Type",
        UNEMPLOYMENT_RATE => "Unemployment Rate",
        other => other,
    }
}

pub fn line_chart(
    df: &DataFrame,
    x: &str,
    y: &str,
    title: impl Into<String>,
) -> Result<Figure, DashboardError> {
    let mut trace = Trace::new(TraceKind::Scatter);
    trace.mode = Some("lines".to_string());
    trace.x = Some(column_values(df, x)?);
    trace.y = Some(column_values(df, y)?);

    Ok(Figure {
        data: vec![trace],
        layout: FigureLayout::titled(title).with_axes(x, y),
    })
}

/// Bar chart of `y` against `x`. With a `color` column the rows are split into
/// one trace per distinct value, in order of first appearance.
pub fn bar_chart(
    df: &DataFrame,
    x: &str,
    y: &str,
    color: Option<&str>,
    title: impl Into<String>,
) -> Result<Figure, DashboardError> {
    let xs = column_values(df, x)?;
    let ys = column_values(df, y)?;
    let mut layout = FigureLayout::titled(title).with_axes(x, y);

    let data = match color {
        Some(color) => {
            let colors = column_values(df, color)?;
            layout.legend = Some(Legend {
                title: Text {
                    text: axis_label(color).to_string(),
                },
            });
            layout.barmode = Some("relative".to_string());

            split_by_color(xs, ys, colors)
                .into_iter()
                .map(|(name, xs, ys)| {
                    let mut trace = Trace::new(TraceKind::Bar);
                    trace.legendgroup = Some(name.clone());
                    trace.name = Some(name);
                    trace.showlegend = Some(true);
                    trace.x = Some(xs);
                    trace.y = Some(ys);
                    trace
                })
                .collect()
        }
        None => {
            let mut trace = Trace::new(TraceKind::Bar);
            trace.x = Some(xs);
            trace.y = Some(ys);
            vec![trace]
        }
    };

    Ok(Figure { data, layout })
}

pub fn pie_chart(
    df: &DataFrame,
    names: &str,
    values: &str,
    title: impl Into<String>,
) -> Result<Figure, DashboardError> {
    let mut trace = Trace::new(TraceKind::Pie);
    trace.labels = Some(column_values(df, names)?);
    trace.values = Some(column_values(df, values)?);

    Ok(Figure {
        data: vec![trace],
        layout: FigureLayout::titled(title),
    })
}

fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Value>, DashboardError> {
    let series = df
        .column(name)
        .map_err(|_| DashboardError::ColumnNotFound(name.to_string()))?;
    let dtype = series.dtype().clone();

    let values: Vec<Value> = if dtype == DataType::String {
        series
            .str()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    } else if dtype == DataType::Boolean {
        series
            .bool()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    } else if dtype.is_numeric() && !dtype.is_float() {
        let ints = series.cast(&DataType::Int64)?;
        ints.i64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    } else if dtype.is_float() {
        let floats = series.cast(&DataType::Float64)?;
        floats
            .f64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    } else {
        // Dates and anything else are shipped as their string form
        let strings = series.cast(&DataType::String)?;
        strings
            .str()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect()
    };

    Ok(values)
}

fn split_by_color(
    xs: Vec<Value>,
    ys: Vec<Value>,
    colors: Vec<Value>,
) -> Vec<(String, Vec<Value>, Vec<Value>)> {
    let mut groups: Vec<(String, Vec<Value>, Vec<Value>)> = Vec::new();

    for ((x, y), color) in xs.into_iter().zip(ys).zip(colors) {
        let key = match color {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        match groups.iter_mut().find(|(name, _, _)| *name == key) {
            Some((_, group_xs, group_ys)) => {
                group_xs.push(x);
                group_ys.push(y);
            }
            None => groups.push((key, vec![x], vec![y])),
        }
    }

    groups
}
