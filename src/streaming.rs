//! Streaming options. Only the primary row may stream; interval and capacity
//! are shown once streaming is switched on.

use crate::model::{FieldKey, Query};

/// Refresh interval offered when the row has none, in milliseconds.
pub const DEFAULT_INTERVAL: i64 = 1000;
/// Points kept in the streaming buffer when the row has none.
pub const DEFAULT_CAPACITY: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamingField {
    Streaming,
    Interval,
    Capacity,
}

impl StreamingField {
    pub fn from_key(key: FieldKey) -> Option<Self> {
        match key {
            FieldKey::Streaming => Some(Self::Streaming),
            FieldKey::StreamingInterval => Some(Self::Interval),
            FieldKey::StreamingCapacity => Some(Self::Capacity),
            _ => None,
        }
    }
}

pub fn is_visible(field: StreamingField, query: &Query) -> bool {
    match field {
        StreamingField::Streaming => query.is_primary_row(),
        StreamingField::Interval | StreamingField::Capacity => {
            query.is_primary_row() && query.streaming_enabled()
        }
    }
}
