use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core_logic::charts::Figure;

pub type Style = BTreeMap<String, String>;

pub fn style(pairs: &[(&str, &str)]) -> Style {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// A node of the page, rendered by the browser shell.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Component {
    Div {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        style: Style,
        children: Vec<Component>,
    },
    H1 {
        text: String,
        style: Style,
    },
    Dropdown {
        id: String,
        options: Vec<DropdownOption>,
        placeholder: String,
        value: Value,
        disabled: bool,
        style: Style,
    },
    Graph {
        figure: Figure,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DropdownOption {
    pub label: String,
    pub value: Value,
}

/// A component property, addressed as `<id>.<property>` on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub id: String,
    pub property: String,
}

impl Dependency {
    pub fn new(id: &str, property: &str) -> Self {
        Dependency {
            id: id.to_string(),
            property: property.to_string(),
        }
    }

    pub fn key(&self) -> String {
        format!("{}.{}", self.id, self.property)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CallbackSpec {
    pub output: String,
    pub inputs: Vec<Dependency>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InputValue {
    pub id: String,
    pub property: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub output: String,
    #[serde(default)]
    pub inputs: Vec<InputValue>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UpdateResponse {
    pub response: BTreeMap<String, BTreeMap<String, Value>>,
}

impl UpdateResponse {
    pub fn single(output: &Dependency, value: Value) -> Self {
        let mut props = BTreeMap::new();
        props.insert(output.property.clone(), value);
        let mut response = BTreeMap::new();
        response.insert(output.id.clone(), props);
        UpdateResponse { response }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
}
