use log::debug;
use polars::frame::DataFrame;
use serde_json::Value;

use crate::api::layout::{OUTPUT_ID, REPORT_TYPE_ID, YEAR_ID};
use crate::api::lib::{report_type_from_value, year_from_value};
use crate::api::models::{CallbackSpec, Dependency, UpdateRequest, UpdateResponse};
use crate::core_logic::controller;
use crate::error::DashboardError;

/// Receives input values in the order the inputs were registered.
pub type Handler = fn(&DataFrame, &[Value]) -> Result<Value, DashboardError>;

pub struct Callback {
    pub output: Dependency,
    pub inputs: Vec<Dependency>,
    handler: Handler,
}

#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's two callbacks: year dropdown enablement and the report output.
    pub fn dashboard() -> Self {
        let mut registry = Self::new();
        registry.register(
            Dependency::new(YEAR_ID, "disabled"),
            vec![Dependency::new(REPORT_TYPE_ID, "value")],
            update_input_container,
        );
        registry.register(
            Dependency::new(OUTPUT_ID, "children"),
            vec![
                Dependency::new(REPORT_TYPE_ID, "value"),
                Dependency::new(YEAR_ID, "value"),
            ],
            update_output_container,
        );
        registry
    }

    /// Registering the same output twice replaces the earlier handler.
    pub fn register(&mut self, output: Dependency, inputs: Vec<Dependency>, handler: Handler) {
        self.callbacks.retain(|callback| callback.output != output);
        self.callbacks.push(Callback {
            output,
            inputs,
            handler,
        });
    }

    pub fn dependencies(&self) -> Vec<CallbackSpec> {
        self.callbacks
            .iter()
            .map(|callback| CallbackSpec {
                output: callback.output.key(),
                inputs: callback.inputs.clone(),
            })
            .collect()
    }

    pub fn dispatch(
        &self,
        df: &DataFrame,
        request: &UpdateRequest,
    ) -> Result<UpdateResponse, DashboardError> {
        let callback = self
            .callbacks
            .iter()
            .find(|callback| callback.output.key() == request.output)
            .ok_or_else(|| DashboardError::UnknownOutput(request.output.clone()))?;

        // Inputs the browser did not send are treated as unset
        let values: Vec<Value> = callback
            .inputs
            .iter()
            .map(|input| {
                request
                    .inputs
                    .iter()
                    .find(|given| given.id == input.id && given.property == input.property)
                    .map_or(Value::Null, |given| given.value.clone())
            })
            .collect();

        debug!("Dispatching {} with inputs {:?}", request.output, values);
        let value = (callback.handler)(df, &values)?;

        Ok(UpdateResponse::single(&callback.output, value))
    }
}

fn update_input_container(_df: &DataFrame, inputs: &[Value]) -> Result<Value, DashboardError> {
    let report_type = report_type_from_value(inputs.first());
    Ok(Value::Bool(controller::year_selector_disabled(report_type)))
}

fn update_output_container(df: &DataFrame, inputs: &[Value]) -> Result<Value, DashboardError> {
    let report_type = report_type_from_value(inputs.first());
    let year = year_from_value(inputs.get(1));
    let rows = controller::update_output_container(df, report_type, year)?;
    Ok(serde_json::to_value(rows)?)
}
