//! Output conversion and printing for command responses
//!
//! Everything a command prints flows through this module so the conversion
//! rules live in one place: typed values export their serde wire form,
//! attribute maps and already-JSON values pass through, and sequences
//! convert element-wise. Converting a converted document again yields the
//! same document.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CliResult;
use fh_client_api::TaskServiceError;

/// A command response on its way to stdout, in decreasing order of how
/// much structure the conversion can rely on.
pub enum OutputValue {
    /// Typed value already exported through its serde representation.
    Structured(Value),
    /// Bare attribute map returned by the service.
    Attributes(Map<String, Value>),
    /// Any JSON-compatible value, including sequences of responses.
    Plain(Value),
}

impl OutputValue {
    /// Export a typed value into its wire form.
    pub fn structured<T: Serialize>(value: &T) -> CliResult<Self> {
        let value = serde_json::to_value(value).map_err(TaskServiceError::from)?;
        Ok(OutputValue::Structured(value))
    }

    /// Wrap a sequence of responses; each element stands on its own.
    pub fn sequence(items: Vec<Value>) -> Self {
        OutputValue::Plain(Value::Array(items))
    }

    /// Single conversion point to the printed JSON document.
    pub fn into_json(self) -> Value {
        match self {
            OutputValue::Structured(value) => value,
            OutputValue::Attributes(map) => Value::Object(map),
            OutputValue::Plain(value) => value,
        }
    }
}

/// What a command sends to stdout.
#[derive(Debug, PartialEq)]
pub enum CommandOutput {
    /// Raw line printed as-is (task identifiers).
    Text(String),
    /// JSON document, pretty-printed with 2-space indentation and
    /// non-ASCII text left intact.
    Json(Value),
}

impl CommandOutput {
    /// Render the final stdout content, without a trailing newline.
    pub fn render(&self) -> CliResult<String> {
        match self {
            CommandOutput::Text(text) => Ok(text.clone()),
            CommandOutput::Json(value) => {
                Ok(serde_json::to_string_pretty(value).map_err(TaskServiceError::from)?)
            }
        }
    }

    /// Print to stdout.
    pub fn print(&self) -> CliResult<()> {
        println!("{}", self.render()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_renders_with_two_space_indent() {
        let output = CommandOutput::Json(json!({"task_id": "abc"}));
        assert_eq!(output.render().unwrap(), "{\n  \"task_id\": \"abc\"\n}");
    }

    #[test]
    fn test_json_preserves_non_ascii_text() {
        let output = CommandOutput::Json(json!({"query": "naïve 画像"}));
        let rendered = output.render().unwrap();
        assert!(rendered.contains("naïve 画像"));
        assert!(!rendered.contains("\\u"));
    }

    #[test]
    fn test_text_renders_verbatim() {
        let output = CommandOutput::Text("abc-123".to_string());
        assert_eq!(output.render().unwrap(), "abc-123");
    }

    #[test]
    fn test_null_renders_as_null() {
        let output = CommandOutput::Json(Value::Null);
        assert_eq!(output.render().unwrap(), "null");
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let first = OutputValue::Plain(json!({"a": [1, 2], "b": "x"})).into_json();
        let second = OutputValue::Plain(first.clone()).into_json();
        assert_eq!(first, second);
    }

    #[test]
    fn test_attributes_convert_to_object() {
        let mut map = Map::new();
        map.insert("status".to_string(), json!("success"));
        assert_eq!(
            OutputValue::Attributes(map).into_json(),
            json!({"status": "success"})
        );
    }

    #[test]
    fn test_sequence_preserves_order() {
        let items = vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})];
        let value = OutputValue::sequence(items).into_json();
        assert_eq!(value, json!([{"n": 1}, {"n": 2}, {"n": 3}]));
    }
}
