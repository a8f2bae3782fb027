//! Render-time view of the editor: what each visible field shows.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Control, FieldKey, FieldValue, Integer, Query, QueryType, Slot};
use crate::registry::catalog::{options_for, SelectOption};
use crate::settings::EditorSettings;
use crate::visibility::{is_visible, visible_fields};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub label: &'static str,
    pub control: Control,
    pub value: FieldValue,
    /// Shown in place of an empty value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

/// Every visible field of `query`, in display order.
pub fn resolve_form(query: &Query, settings: &EditorSettings) -> IndexMap<FieldKey, FieldView> {
    visible_fields(query)
        .into_iter()
        .map(|field| (field, build(field, query, settings)))
        .collect()
}

/// View of a single field, or `None` when it is hidden.
pub fn field_view(field: FieldKey, query: &Query, settings: &EditorSettings) -> Option<FieldView> {
    is_visible(field, query).then(|| build(field, query, settings))
}

fn build(field: FieldKey, query: &Query, settings: &EditorSettings) -> FieldView {
    FieldView {
        label: field.label(),
        control: field.control(),
        value: effective_value(field, query),
        default: default_value(field, settings),
        options: options_for(field, query.query_type),
    }
}

/// The value a field displays. Switches read as off when nothing is stored.
pub fn effective_value(field: FieldKey, query: &Query) -> FieldValue {
    match field.slot() {
        Slot::Type => FieldValue::QueryType(query.query_type),
        Slot::Query => FieldValue::Text(Some(query.query.clone())),
        Slot::Command => FieldValue::Command(query.command.clone()),
        Slot::Text(t) => FieldValue::Text(query.text(t).map(str::to_string)),
        Slot::Integer(i) => FieldValue::Integer(query.integer(i)),
        Slot::Flag(f) => FieldValue::Bool(query.flag(f).unwrap_or(false)),
    }
}

fn default_value(field: FieldKey, settings: &EditorSettings) -> Option<FieldValue> {
    match field {
        FieldKey::Type => Some(FieldValue::QueryType(QueryType::default())),
        FieldKey::Fill | FieldKey::Streaming => Some(FieldValue::Bool(false)),
        FieldKey::StreamingInterval => Some(FieldValue::Integer(Some(Integer::Value(
            settings.default_streaming_interval,
        )))),
        FieldKey::StreamingCapacity => Some(FieldValue::Integer(Some(Integer::Value(
            settings.default_streaming_capacity,
        )))),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Query {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn form_lists_visible_fields_in_order() {
        let q = doc(json!({ "type": "command", "command": "hget", "keyName": "user:1" }));
        let form = resolve_form(&q, &EditorSettings::default());
        let keys: Vec<FieldKey> = form.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                FieldKey::Type,
                FieldKey::Command,
                FieldKey::KeyName,
                FieldKey::Field,
                FieldKey::Streaming,
            ]
        );
        assert_eq!(form[&FieldKey::KeyName].value, FieldValue::Text(Some("user:1".into())));
        assert_eq!(form[&FieldKey::Field].value, FieldValue::Text(None));
        assert_eq!(form[&FieldKey::KeyName].control, Control::Input);
    }

    #[test]
    fn fill_reads_false_without_rewriting() {
        let q = doc(json!({
            "type": "timeSeries",
            "command": "ts.range",
            "aggregation": "avg",
            "bucket": 300,
        }));
        let view = field_view(FieldKey::Fill, &q, &EditorSettings::default()).unwrap();
        assert_eq!(view.value, FieldValue::Bool(false));
        assert_eq!(view.control, Control::Switch);
        assert_eq!(q.fill, None);
    }

    #[test]
    fn label_fields_read_shared_slots() {
        let q = doc(json!({
            "type": "timeSeries",
            "command": "ts.mget",
            "legend": "sensor",
            "value": "temp",
        }));
        let form = resolve_form(&q, &EditorSettings::default());
        assert_eq!(form[&FieldKey::LegendLabel].value, FieldValue::Text(Some("sensor".into())));
        assert_eq!(form[&FieldKey::ValueLabel].value, FieldValue::Text(Some("temp".into())));
        assert!(!form.contains_key(&FieldKey::Legend));
    }

    #[test]
    fn streaming_defaults_come_from_settings() {
        let q = doc(json!({ "streaming": true }));
        let settings = EditorSettings {
            default_streaming_interval: 250,
            ..EditorSettings::default()
        };
        let form = resolve_form(&q, &settings);
        assert_eq!(
            form[&FieldKey::StreamingInterval].default,
            Some(FieldValue::Integer(Some(Integer::Value(250))))
        );
        assert_eq!(
            form[&FieldKey::StreamingCapacity].default,
            Some(FieldValue::Integer(Some(Integer::Value(1000))))
        );
        assert_eq!(form[&FieldKey::StreamingInterval].value, FieldValue::Integer(None));
    }

    #[test]
    fn hidden_fields_have_no_view() {
        let q = doc(json!({ "refId": "B", "type": "cli", "query": "PING" }));
        let settings = EditorSettings::default();
        assert!(field_view(FieldKey::Streaming, &q, &settings).is_none());
        assert!(field_view(FieldKey::Command, &q, &settings).is_none());
        let query = field_view(FieldKey::Query, &q, &settings).unwrap();
        assert_eq!(query.control, Control::TextArea);
        assert_eq!(query.value, FieldValue::Text(Some("PING".into())));
    }

    #[test]
    fn command_selector_offers_type_commands() {
        let q = doc(json!({ "type": "timeSeries" }));
        let view = field_view(FieldKey::Command, &q, &EditorSettings::default()).unwrap();
        assert!(view.options.iter().all(|o| o.value.starts_with("ts.")));
        assert_eq!(view.value, FieldValue::Command(crate::model::Command::Unset));
    }

    #[test]
    fn form_serializes_with_field_ids() {
        let q = doc(json!({ "type": "command", "command": "get" }));
        let json = serde_json::to_value(resolve_form(&q, &EditorSettings::default())).unwrap();
        assert_eq!(json["keyName"]["label"], "Key");
        assert_eq!(json["type"]["value"]["kind"], "queryType");
        assert_eq!(json["type"]["value"]["value"], "command");
    }
}
