//! JSON input helpers

use serde_json::{Map, Value};

use super::CliError;

/// Unwraps a JSON object for use as an evaluation record
pub fn json_to_record(v: Value) -> Result<Map<String, Value>, CliError> {
    match v {
        Value::Object(map) => Ok(map),
        other => Err(CliError::InvalidInput(format!(
            "expected a JSON object as record, got {}",
            other
        ))),
    }
}

/// Reads raw result rows: either a JSON array of objects or an object with
/// the rows under `data`
pub fn read_json_rows(json_str: &str) -> Result<Vec<Value>, CliError> {
    match serde_json::from_str(json_str)? {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(rows)) => Ok(rows),
            _ => Err(CliError::InvalidInput(
                "expected an array of rows or an object with a 'data' array".into(),
            )),
        },
        _ => Err(CliError::InvalidInput(
            "expected an array of rows or an object with a 'data' array".into(),
        )),
    }
}
