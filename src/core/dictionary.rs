use crate::utils::error::{PackError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flattens the top-level fields of `source` into name/text pairs, sorted by
/// name. Null fields are skipped; strings are kept raw and every other value
/// is rendered as compact JSON.
pub fn to_dictionary<T: Serialize + ?Sized>(source: &T) -> Result<BTreeMap<String, String>> {
    match serde_json::to_value(source)? {
        Value::Object(object) => Ok(object
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| {
                let text = match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                (name, text)
            })
            .collect()),
        Value::Null => Err(PackError::invalid_argument(
            "source",
            "Unable to convert object to a dictionary. The source object is null.",
        )),
        other => Err(PackError::invalid_argument(
            "source",
            format!("Unable to convert {} to a dictionary. Only objects are supported.", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
