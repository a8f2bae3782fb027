use crate::error::EditorError;
use crate::event::RawValue;
use crate::model::{Command, FieldKey, FieldUpdate, Integer, QueryType, Slot};
use crate::util::from_serde_str;

/// Convert a raw widget payload into a typed update for `field`'s slot.
///
/// Integer slots never fail: anything without leading digits becomes
/// `NotANumber`. Only the type selector and switches can reject a payload.
pub fn coerce(field: FieldKey, raw: RawValue) -> Result<FieldUpdate, EditorError> {
    let update = match field.slot() {
        Slot::Type => FieldUpdate::Type(query_type(field, raw)?),
        Slot::Query => FieldUpdate::Query(text_or_empty(raw)),
        Slot::Command => FieldUpdate::Command(Command::from_name(&text_or_empty(raw))),
        Slot::Text(slot) => FieldUpdate::Text(slot, optional_text(raw)),
        Slot::Integer(slot) => FieldUpdate::Integer(slot, integer(&raw)),
        Slot::Flag(slot) => FieldUpdate::Flag(slot, flag(field, raw)?),
    };
    Ok(update)
}

fn query_type(field: FieldKey, raw: RawValue) -> Result<QueryType, EditorError> {
    match raw {
        RawValue::Text(s) => from_serde_str(&s).ok_or_else(|| EditorError::InvalidValue {
            field,
            message: format!("unknown query type '{s}'"),
        }),
        other => Err(EditorError::InvalidValue {
            field,
            message: format!("expected a query type name, got {other}"),
        }),
    }
}

fn text_or_empty(raw: RawValue) -> String {
    match raw {
        RawValue::Null => String::new(),
        RawValue::Text(s) => s,
        other => other.to_string(),
    }
}

fn optional_text(raw: RawValue) -> Option<String> {
    match raw {
        RawValue::Null => None,
        RawValue::Text(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn integer(raw: &RawValue) -> Integer {
    match raw {
        RawValue::Number(n) => Integer::from_f64(*n),
        RawValue::Text(s) => Integer::parse(s),
        RawValue::Null | RawValue::Bool(_) => Integer::NotANumber,
    }
}

fn flag(field: FieldKey, raw: RawValue) -> Result<Option<bool>, EditorError> {
    match raw {
        RawValue::Null => Ok(None),
        RawValue::Bool(b) => Ok(Some(b)),
        RawValue::Number(n) => Ok(Some(n != 0.0)),
        RawValue::Text(s) => match s.trim() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(EditorError::InvalidValue {
                field,
                message: format!("expected true or false, got '{other}'"),
            }),
        },
    }
}
