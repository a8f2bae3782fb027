//! Rule engine behind the Redis query editor.
//!
//! A query row is a flat document ([`model::Query`]). The registry says which
//! parameters each command takes, [`visibility`] decides which fields are
//! shown, and [`reducer`] produces the next document when one field changes.

pub mod coerce;
pub mod error;
pub mod event;
pub mod form;
pub mod logging;
pub mod model;
pub mod paths;
pub mod reducer;
pub mod registry;
pub mod settings;
pub mod storage;
pub mod streaming;
pub mod util;
pub mod visibility;

pub use error::EditorError;
pub use event::{ChangeEvent, RawValue};
pub use reducer::{apply, prune, try_apply, QueryEditor};
