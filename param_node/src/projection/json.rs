//! `serde_json` projection backend.

use serde_json::{Map, Value};

use crate::ParamResult;

use super::ScriptRuntime;

/// Projects trees into [`serde_json::Value`]s.
///
/// Empty leaves become `null`, text becomes strings and nodes with children
/// become objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRuntime {
    objects: usize,
}

impl JsonRuntime {
    /// Number of objects built by this runtime so far.
    #[must_use]
    pub const fn objects_built(&self) -> usize {
        self.objects
    }
}

impl ScriptRuntime for JsonRuntime {
    type Value = Value;

    fn undefined(&mut self) -> Value {
        Value::Null
    }

    fn string(&mut self, text: &str) -> Value {
        Value::String(text.to_owned())
    }

    fn object(&mut self, entries: Vec<(&str, Value)>) -> ParamResult<Value> {
        self.objects += 1;
        let map: Map<String, Value> = entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect();
        Ok(Value::Object(map))
    }
}
