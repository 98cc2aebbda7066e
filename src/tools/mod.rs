//! Operation catalog, grouped by ClickUp resource area.
//!
//! Each area module declares argument types (the parameter contract the MCP
//! client sees through `JsonSchema`) and one async handler per operation.
//! Handlers take a [`ClickUpClient`](crate::client::ClickUpClient), shape the
//! request, and return the value the server serializes back to the caller.

pub mod checklists;
pub mod comments;
pub mod dependencies;
pub mod members;
pub mod navigation;
pub mod tags;
pub mod tasks;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ServiceError, ServiceResult};

/// Rules checked before a handler runs, beyond what deserialization enforces.
pub trait Contract {
    fn check(&self) -> ServiceResult<()> {
        Ok(())
    }
}

/// Priority: 1=urgent, 2=high, 3=normal, 4=low.
pub fn check_priority(priority: Option<i64>) -> ServiceResult<()> {
    match priority {
        Some(p) if !(1..=4).contains(&p) => Err(ServiceError::InvalidParams(format!(
            "priority must be between 1 and 4, got {p}"
        ))),
        _ => Ok(()),
    }
}

/// Treats an empty string the same as a missing value.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Small confirmation record returned instead of echoing upstream data.
pub fn confirmation(flag: &str, fields: &[(&str, &str)]) -> Value {
    let mut out = Map::new();
    out.insert(flag.to_string(), Value::Bool(true));
    for (key, value) in fields {
        out.insert((*key).to_string(), Value::String((*value).to_string()));
    }
    Value::Object(out)
}

/// Custom field value; its shape depends on the field type.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum CustomFieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Options(Vec<String>),
    Object(Map<String, Value>),
}
