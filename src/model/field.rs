use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::command::Command;
use super::query::{Integer, QueryType};

/// A tag marking that a command accepts one auxiliary parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Capability {
    Key,
    Filter,
    Field,
    Legend,
    LegendLabel,
    ValueLabel,
    Size,
    Section,
    Aggregation,
    Fill,
}

/// The widget kind a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Control {
    Select,
    Input,
    TextArea,
    NumberInput,
    Switch,
}

/// Every editable field of a query row, keyed by the editor's field ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FieldKey {
    #[serde(rename = "type")]
    Type,
    Query,
    Command,
    KeyName,
    Filter,
    Field,
    Legend,
    LegendLabel,
    ValueLabel,
    Size,
    Section,
    Aggregation,
    Bucket,
    Fill,
    Streaming,
    StreamingInterval,
    StreamingCapacity,
}

impl FieldKey {
    /// All fields in display order.
    pub fn all() -> &'static [FieldKey] {
        &[
            Self::Type,
            Self::Query,
            Self::Command,
            Self::KeyName,
            Self::Filter,
            Self::Field,
            Self::Legend,
            Self::LegendLabel,
            Self::ValueLabel,
            Self::Size,
            Self::Section,
            Self::Aggregation,
            Self::Bucket,
            Self::Fill,
            Self::Streaming,
            Self::StreamingInterval,
            Self::StreamingCapacity,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Query => "Query",
            Self::Command => "Command",
            Self::KeyName => "Key",
            Self::Filter => "Label Filter",
            Self::Field => "Field",
            Self::Legend => "Legend",
            Self::LegendLabel => "Legend Label",
            Self::ValueLabel => "Value Label",
            Self::Size => "Size",
            Self::Section => "Section",
            Self::Aggregation => "Aggregation",
            Self::Bucket => "Time Bucket",
            Self::Fill => "Fill Missing",
            Self::Streaming => "Streaming",
            Self::StreamingInterval => "Interval",
            Self::StreamingCapacity => "Capacity",
        }
    }

    pub fn control(self) -> Control {
        match self {
            Self::Type | Self::Command | Self::Section | Self::Aggregation => Control::Select,
            Self::Query => Control::TextArea,
            Self::KeyName
            | Self::Filter
            | Self::Field
            | Self::Legend
            | Self::LegendLabel
            | Self::ValueLabel => Control::Input,
            Self::Size | Self::Bucket | Self::StreamingInterval | Self::StreamingCapacity => {
                Control::NumberInput
            }
            Self::Fill | Self::Streaming => Control::Switch,
        }
    }

    /// The registry capability that gates this field, if any.
    /// `Bucket` has none: it hangs off `Aggregation`.
    pub fn capability(self) -> Option<Capability> {
        match self {
            Self::KeyName => Some(Capability::Key),
            Self::Filter => Some(Capability::Filter),
            Self::Field => Some(Capability::Field),
            Self::Legend => Some(Capability::Legend),
            Self::LegendLabel => Some(Capability::LegendLabel),
            Self::ValueLabel => Some(Capability::ValueLabel),
            Self::Size => Some(Capability::Size),
            Self::Section => Some(Capability::Section),
            Self::Aggregation => Some(Capability::Aggregation),
            Self::Fill => Some(Capability::Fill),
            Self::Type
            | Self::Query
            | Self::Command
            | Self::Bucket
            | Self::Streaming
            | Self::StreamingInterval
            | Self::StreamingCapacity => None,
        }
    }

    /// Fields that only mean something for a structured command.
    pub fn is_command_specific(self) -> bool {
        self.capability().is_some() || self == Self::Bucket
    }
}

// ── Storage slots ───────────────────────────────────────────────

/// Optional string slots of a query document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    KeyName,
    Filter,
    Field,
    Legend,
    Value,
    Section,
    Aggregation,
}

/// Optional integer slots of a query document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerField {
    Size,
    Bucket,
    StreamingInterval,
    StreamingCapacity,
}

/// Optional boolean slots of a query document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagField {
    Fill,
    Streaming,
}

/// Where an editor field reads and writes its value.
/// `LegendLabel` shares the `legend` slot; `ValueLabel` writes `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Type,
    Query,
    Command,
    Text(TextField),
    Integer(IntegerField),
    Flag(FlagField),
}

impl FieldKey {
    pub fn slot(self) -> Slot {
        match self {
            Self::Type => Slot::Type,
            Self::Query => Slot::Query,
            Self::Command => Slot::Command,
            Self::KeyName => Slot::Text(TextField::KeyName),
            Self::Filter => Slot::Text(TextField::Filter),
            Self::Field => Slot::Text(TextField::Field),
            Self::Legend | Self::LegendLabel => Slot::Text(TextField::Legend),
            Self::ValueLabel => Slot::Text(TextField::Value),
            Self::Section => Slot::Text(TextField::Section),
            Self::Aggregation => Slot::Text(TextField::Aggregation),
            Self::Size => Slot::Integer(IntegerField::Size),
            Self::Bucket => Slot::Integer(IntegerField::Bucket),
            Self::StreamingInterval => Slot::Integer(IntegerField::StreamingInterval),
            Self::StreamingCapacity => Slot::Integer(IntegerField::StreamingCapacity),
            Self::Fill => Slot::Flag(FlagField::Fill),
            Self::Streaming => Slot::Flag(FlagField::Streaming),
        }
    }
}

/// A coerced value ready to be merged into a document.
/// Each variant names the slot it writes.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Type(QueryType),
    Query(String),
    Command(Command),
    Text(TextField, Option<String>),
    Integer(IntegerField, Integer),
    Flag(FlagField, Option<bool>),
}

/// The effective value of a field as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    QueryType(QueryType),
    Command(Command),
    Text(Option<String>),
    Integer(Option<Integer>),
    Bool(bool),
}
