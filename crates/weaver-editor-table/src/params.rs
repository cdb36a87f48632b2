//! Raw editor parameters.
//!
//! Parameters are an untyped JSON object, as the host editor hands them
//! out. Typed lookups fall back to the caller's default when a value is
//! missing or has the wrong type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON type name of a value, for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorParams {
    values: Map<String, Value>,
}

impl EditorParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    /// Typed lookup: `extract` decides whether the value has the right type.
    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Option<T> {
        let value = self.values.get(name)?;
        let typed = extract(value);
        if typed.is_none() {
            tracing::trace!(
                param = name,
                expected,
                found = value_kind(value),
                "param has the wrong type, using default"
            );
        }
        typed
    }

    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.typed(name, "boolean", Value::as_bool).unwrap_or(default)
    }

    pub fn get_str<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.typed(name, "string", Value::as_str).unwrap_or(default)
    }

    pub fn get_array(&self, name: &str) -> Option<&Vec<Value>> {
        self.typed(name, "array", Value::as_array)
    }

    pub fn get_object(&self, name: &str) -> Option<&Map<String, Value>> {
        self.typed(name, "object", Value::as_object)
    }
}

impl From<Map<String, Value>> for EditorParams {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for EditorParams {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
