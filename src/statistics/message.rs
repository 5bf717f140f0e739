use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single entry in a [`StatisticsCounter`](super::StatisticsCounter) log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogMessage {
    Text(String),
    Lines(Vec<String>),
    Structured(Value),
}

impl LogMessage {
    /// Captures any serializable value as a structured message.
    ///
    /// A value that cannot be serialized degrades to its error text.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::String(text)) => LogMessage::Text(text),
            Ok(value) => LogMessage::Structured(value),
            Err(err) => LogMessage::Text(err.to_string()),
        }
    }

    /// Renders the message the way it appears in the report.
    pub fn render(&self) -> String {
        match self {
            LogMessage::Text(text) => text.clone(),
            LogMessage::Lines(lines) => lines.join("\n"),
            LogMessage::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl Default for LogMessage {
    fn default() -> Self {
        LogMessage::Text(String::new())
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        LogMessage::Text(text.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(text: String) -> Self {
        LogMessage::Text(text)
    }
}

impl From<Vec<String>> for LogMessage {
    fn from(lines: Vec<String>) -> Self {
        LogMessage::Lines(lines)
    }
}

impl From<Vec<&str>> for LogMessage {
    fn from(lines: Vec<&str>) -> Self {
        LogMessage::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for LogMessage {
    fn from(lines: &[&str]) -> Self {
        LogMessage::Lines(lines.iter().map(|line| line.to_string()).collect())
    }
}

impl From<Value> for LogMessage {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => LogMessage::Text(text),
            Value::Array(items) if items.iter().all(Value::is_string) => LogMessage::Lines(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(line) => Some(line),
                        _ => None,
                    })
                    .collect(),
            ),
            other => LogMessage::Structured(other),
        }
    }
}
