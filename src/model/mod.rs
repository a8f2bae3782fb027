pub mod command;
pub mod field;
pub mod query;

// Re-export commonly used types at the model level.
pub use command::Command;
pub use field::{
    Capability, Control, FieldKey, FieldUpdate, FieldValue, FlagField, IntegerField, Slot,
    TextField,
};
pub use query::{Integer, Query, QueryType, PRIMARY_REF_ID};
