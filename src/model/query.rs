use std::fmt;

use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use super::command::Command;
use super::field::{FieldUpdate, FlagField, IntegerField, TextField};

/// Row id of the primary query in a multi-query panel.
pub const PRIMARY_REF_ID: &str = "A";

fn default_ref_id() -> String {
    PRIMARY_REF_ID.to_string()
}

/// `null` loads like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_ref_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(|id| id.unwrap_or_else(default_ref_id))
}

/// Editing mode of a query row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum QueryType {
    /// Free-form command line text.
    Cli,
    /// Structured Redis command.
    #[default]
    Command,
    /// Structured RedisTimeSeries command.
    #[serde(alias = "ts")]
    TimeSeries,
}

impl QueryType {
    pub fn all() -> &'static [QueryType] {
        &[Self::Command, Self::TimeSeries, Self::Cli]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cli => "Command Line Interface",
            Self::Command => "Redis",
            Self::TimeSeries => "RedisTimeSeries",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Cli => "Raw command line, executed as typed",
            Self::Command => "Hashes, Sets, Lists, Strings, Streams, Server",
            Self::TimeSeries => "RedisTimeSeries commands",
        }
    }
}

/// A stored numeric parameter.
///
/// Integer inputs are parsed leniently and the result is kept even when the
/// input had no digits at all, in which case the value is `NotANumber`.
/// On the wire `NotANumber` is written as a NaN float, which JSON encodes as `null`.
/// A `null` integer field loads as absent, so after one save and reload a
/// `NotANumber` becomes `None` and later saves drop the key. Both read as
/// "no value" and keep dependent fields hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    Value(i64),
    NotANumber,
}

impl Integer {
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotANumber => None,
        }
    }

    /// Zero and `NotANumber` both count as "not filled".
    pub fn is_non_zero(self) -> bool {
        matches!(self, Self::Value(v) if v != 0)
    }

    /// Base-10 parse of the leading integer in `input`: optional surrounding
    /// whitespace, an optional sign, then digits. Trailing garbage is ignored;
    /// no digits gives `NotANumber`. Out-of-range values saturate.
    pub fn parse(input: &str) -> Self {
        let mut chars = input.trim_start().chars().peekable();
        let negative = match chars.peek() {
            Some('-') => {
                chars.next();
                true
            }
            Some('+') => {
                chars.next();
                false
            }
            _ => false,
        };

        let mut value: i64 = 0;
        let mut any_digit = false;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            chars.next();
            any_digit = true;
            let digit = i64::from(digit);
            value = if negative {
                value.saturating_mul(10).saturating_sub(digit)
            } else {
                value.saturating_mul(10).saturating_add(digit)
            };
        }

        if any_digit {
            Self::Value(value)
        } else {
            Self::NotANumber
        }
    }

    /// Truncate a float toward zero. Non-finite input gives `NotANumber`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            // `as` saturates at the i64 bounds.
            Self::Value(value.trunc() as i64)
        } else {
            Self::NotANumber
        }
    }
}

impl From<i64> for Integer {
    fn from(v: i64) -> Self {
        Self::Value(v)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::NotANumber => write!(f, "NaN"),
        }
    }
}

impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_i64(*v),
            Self::NotANumber => serializer.serialize_f64(f64::NAN),
        }
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IntegerVisitor;

        impl Visitor<'_> for IntegerVisitor {
            type Value = Integer;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer, a number or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Integer, E> {
                Ok(Integer::Value(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Integer, E> {
                Ok(Integer::Value(i64::try_from(v).unwrap_or(i64::MAX)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Integer, E> {
                Ok(Integer::from_f64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Integer, E> {
                Ok(Integer::parse(v))
            }
        }

        deserializer.deserialize_any(IntegerVisitor)
    }
}

impl JsonSchema for Integer {
    fn schema_name() -> String {
        "Integer".to_string()
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <i64>::json_schema(gen)
    }
}

/// The query document edited by one row of a panel.
///
/// Every field is optional on the wire so documents saved by older editors
/// keep loading. Stale values for fields the current command does not use are
/// kept as-is; relevance is decided by the visibility rules, not the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Query {
    #[serde(default = "default_ref_id", deserialize_with = "null_as_ref_id")]
    pub ref_id: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub query_type: QueryType,
    /// Raw command line, only used in CLI mode.
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[ts(type = "string")]
    #[schemars(with = "String")]
    pub command: Command,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub key_name: Option<String>,
    /// Label filter for multi-series time-series commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub legend: Option<String>,
    /// Value label for multi-series time-series commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub value: Option<String>,
    /// INFO section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub aggregation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub size: Option<Integer>,
    /// Aggregation time bucket in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub bucket: Option<Integer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub streaming: Option<bool>,
    /// Streaming poll interval in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub streaming_interval: Option<Integer>,
    /// Number of points kept by the streaming buffer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub streaming_capacity: Option<Integer>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new(PRIMARY_REF_ID)
    }
}

impl Query {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            query_type: QueryType::default(),
            query: String::new(),
            command: Command::Unset,
            key_name: None,
            filter: None,
            field: None,
            legend: None,
            value: None,
            section: None,
            aggregation: None,
            size: None,
            bucket: None,
            fill: None,
            streaming: None,
            streaming_interval: None,
            streaming_capacity: None,
        }
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::KeyName => self.key_name.as_deref(),
            TextField::Filter => self.filter.as_deref(),
            TextField::Field => self.field.as_deref(),
            TextField::Legend => self.legend.as_deref(),
            TextField::Value => self.value.as_deref(),
            TextField::Section => self.section.as_deref(),
            TextField::Aggregation => self.aggregation.as_deref(),
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut Option<String> {
        match field {
            TextField::KeyName => &mut self.key_name,
            TextField::Filter => &mut self.filter,
            TextField::Field => &mut self.field,
            TextField::Legend => &mut self.legend,
            TextField::Value => &mut self.value,
            TextField::Section => &mut self.section,
            TextField::Aggregation => &mut self.aggregation,
        }
    }

    pub fn integer(&self, field: IntegerField) -> Option<Integer> {
        match field {
            IntegerField::Size => self.size,
            IntegerField::Bucket => self.bucket,
            IntegerField::StreamingInterval => self.streaming_interval,
            IntegerField::StreamingCapacity => self.streaming_capacity,
        }
    }

    fn integer_mut(&mut self, field: IntegerField) -> &mut Option<Integer> {
        match field {
            IntegerField::Size => &mut self.size,
            IntegerField::Bucket => &mut self.bucket,
            IntegerField::StreamingInterval => &mut self.streaming_interval,
            IntegerField::StreamingCapacity => &mut self.streaming_capacity,
        }
    }

    pub fn flag(&self, field: FlagField) -> Option<bool> {
        match field {
            FlagField::Fill => self.fill,
            FlagField::Streaming => self.streaming,
        }
    }

    fn flag_mut(&mut self, field: FlagField) -> &mut Option<bool> {
        match field {
            FlagField::Fill => &mut self.fill,
            FlagField::Streaming => &mut self.streaming,
        }
    }

    pub fn is_primary_row(&self) -> bool {
        self.ref_id == PRIMARY_REF_ID
    }

    pub fn streaming_enabled(&self) -> bool {
        self.streaming == Some(true)
    }

    pub fn has_aggregation(&self) -> bool {
        self.aggregation.as_deref().is_some_and(|a| !a.is_empty())
    }

    pub fn has_bucket(&self) -> bool {
        self.bucket.is_some_and(Integer::is_non_zero)
    }

    /// Shallow-merge one coerced value. Only the named slot changes.
    pub fn with_update(mut self, update: FieldUpdate) -> Self {
        match update {
            FieldUpdate::Type(t) => self.query_type = t,
            FieldUpdate::Query(q) => self.query = q,
            FieldUpdate::Command(c) => self.command = c,
            FieldUpdate::Text(field, v) => *self.text_mut(field) = v,
            FieldUpdate::Integer(field, v) => *self.integer_mut(field) = Some(v),
            FieldUpdate::Flag(field, v) => *self.flag_mut(field) = v,
        }
        self
    }

    /// Drop whatever is stored in a slot. Used when pruning stale fields.
    pub(crate) fn clear_text(&mut self, field: TextField) {
        *self.text_mut(field) = None;
    }

    pub(crate) fn clear_integer(&mut self, field: IntegerField) {
        *self.integer_mut(field) = None;
    }

    pub(crate) fn clear_flag(&mut self, field: FlagField) {
        *self.flag_mut(field) = None;
    }
}
