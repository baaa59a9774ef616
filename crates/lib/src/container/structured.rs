//! Conversion between containers and plain structured data.
//!
//! Structured data is represented as [`serde_json::Value`]. A container whose
//! keys are exactly `0..n` in order becomes an array; any other container
//! becomes an object with stringified keys. An empty container exports the
//! way it was built: `{}` for an imported object or a container whose first
//! entry was named, `[]` otherwise.

use serde_json::{Map, Number};

use super::{Container, ContainerError, Key, Shape, Value};

impl Container {
    /// Builds a container from structured data.
    ///
    /// Arrays produce integer keys `0..n`, objects keep their keys as names,
    /// and nested arrays and objects become child containers.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::TypeMismatch`] if `data` is a scalar.
    pub fn from_structured(data: serde_json::Value) -> Result<Container, ContainerError> {
        match Value::from(data) {
            Value::Container(container) => Ok(container),
            other => Err(ContainerError::TypeMismatch {
                expected: "array or object".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Exports the container, recursively, as structured data
    pub fn to_structured(&self) -> serde_json::Value {
        if self.is_list() {
            serde_json::Value::Array(self.values().map(Value::to_structured).collect())
        } else {
            let map: Map<String, serde_json::Value> = self
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_structured()))
                .collect();
            serde_json::Value::Object(map)
        }
    }

    /// True when the keys are exactly `0..n` in insertion order
    fn is_list(&self) -> bool {
        if self.is_empty() {
            return self.shape() == Shape::List;
        }
        self.keys()
            .enumerate()
            .all(|(position, key)| key.as_index() == i64::try_from(position).ok())
    }
}

impl Value {
    /// Exports the value as structured data.
    ///
    /// Non-finite floats have no structured form and export as null.
    pub fn to_structured(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::Number((*n).into()),
            Value::Float(n) => Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Container(container) => container.to_structured(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(data: serde_json::Value) -> Self {
        match data {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(int) => Value::Int(int),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Container(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut container: Container = map
                    .into_iter()
                    .map(|(key, value)| (Key::Name(key), Value::from(value)))
                    .collect();
                container.shape = Shape::Map;
                Value::Container(container)
            }
        }
    }
}
