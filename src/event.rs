//! Raw UI events and their normalization.
//!
//! Widgets report changes in different shapes: selects pass `{ value }`,
//! text and number inputs pass `{ target: { value } }`, switches pass
//! `{ currentTarget: { checked } }`. Everything is reduced to one [`RawValue`]
//! here, so coercion never looks at the event shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// A widget payload before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for RawValue {
    /// Formats the payload the way a text input would show it.
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => f.write_str("null"),
            RawValue::Bool(b) => write!(f, "{b}"),
            // Whole numbers print without a fractional part.
            RawValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<i64> for RawValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputTarget {
    pub value: RawValue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckedTarget {
    pub checked: bool,
}

/// A change event as emitted by a widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChangeEvent {
    /// Text and number inputs.
    Input { target: InputTarget },
    /// Switches.
    Toggle {
        #[serde(rename = "currentTarget")]
        current_target: CheckedTarget,
    },
    /// Selects.
    Select { value: RawValue },
}

impl ChangeEvent {
    pub fn into_raw(self) -> RawValue {
        match self {
            ChangeEvent::Input { target } => target.value,
            ChangeEvent::Toggle { current_target } => RawValue::Bool(current_target.checked),
            ChangeEvent::Select { value } => value,
        }
    }

    pub fn from_json(input: &serde_json::Value) -> Result<Self, EditorError> {
        serde_json::from_value(input.clone()).map_err(|_| EditorError::InvalidEvent {
            message: format!(
                "expected {{value}}, {{target: {{value}}}} or {{currentTarget: {{checked}}}}, got {input}"
            ),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_event_normalizes() {
        let ev = ChangeEvent::from_json(&json!({ "value": "command" })).unwrap();
        assert_eq!(ev.into_raw(), RawValue::Text("command".into()));
    }

    #[test]
    fn input_event_normalizes() {
        let ev = ChangeEvent::from_json(&json!({ "target": { "value": "1234" } })).unwrap();
        assert_eq!(ev.into_raw(), RawValue::Text("1234".into()));

        let ev = ChangeEvent::from_json(&json!({ "target": { "value": 1234 } })).unwrap();
        assert_eq!(ev.into_raw(), RawValue::Number(1234.0));
    }

    #[test]
    fn switch_event_normalizes() {
        let ev = ChangeEvent::from_json(&json!({ "currentTarget": { "checked": false } })).unwrap();
        assert_eq!(ev.into_raw(), RawValue::Bool(false));
    }

    #[test]
    fn null_payload_is_kept() {
        let ev = ChangeEvent::from_json(&json!({ "value": null })).unwrap();
        assert_eq!(ev.into_raw(), RawValue::Null);
    }

    #[test]
    fn unknown_shapes_are_rejected() {
        assert!(matches!(
            ChangeEvent::from_json(&json!({ "checked": true })),
            Err(EditorError::InvalidEvent { .. })
        ));
        assert!(ChangeEvent::from_json(&json!("bare")).is_err());
        assert!(ChangeEvent::from_json(&json!({ "target": {} })).is_err());
    }

    #[test]
    fn raw_values_print_like_text_inputs() {
        assert_eq!(RawValue::Number(300.0).to_string(), "300");
        assert_eq!(RawValue::Number(1.5).to_string(), "1.5");
        assert_eq!(RawValue::Bool(true).to_string(), "true");
        assert_eq!(RawValue::from("abc").to_string(), "abc");
    }
}
