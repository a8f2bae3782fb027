//! Query state transitions.
//!
//! Every operation borrows the current document and returns a new one; the
//! input is never touched. [`apply`] is the permissive path used by the form
//! as rendered. [`try_apply`] additionally refuses edits to hidden fields, and
//! [`QueryEditor`] picks between the two from settings.

use std::collections::HashSet;

use crate::coerce::coerce;
use crate::error::EditorError;
use crate::event::{ChangeEvent, RawValue};
use crate::model::{Command, FieldKey, FieldUpdate, Query, QueryType, Slot};
use crate::settings::EditorSettings;
use crate::visibility::{is_visible, visible_fields};

/// Store one field change. Uncoercible payloads leave the document as it was.
pub fn apply(query: &Query, field: FieldKey, raw: RawValue) -> Query {
    match coerce(field, raw) {
        Ok(update) => merge(query, update),
        Err(e) => {
            tracing::warn!(ref_id = %query.ref_id, error = %e, "change ignored");
            query.clone()
        }
    }
}

/// Like [`apply`], but the field must currently be shown.
pub fn try_apply(query: &Query, field: FieldKey, raw: RawValue) -> Result<Query, EditorError> {
    if !is_visible(field, query) {
        return Err(EditorError::FieldNotApplicable { field });
    }
    let update = coerce(field, raw)?;
    Ok(merge(query, update))
}

fn merge(query: &Query, update: FieldUpdate) -> Query {
    let next = query.clone();
    match update {
        FieldUpdate::Type(query_type) => Query {
            query_type,
            query: String::new(),
            command: Command::Unset,
            ..next
        },
        other => next.with_update(other),
    }
}

/// Clear every stored value the form would not show, including the text or
/// command of the inactive mode. The type and row are always kept.
pub fn prune(query: &Query) -> Query {
    let mut next = query.clone();
    let live: HashSet<Slot> = visible_fields(query).into_iter().map(FieldKey::slot).collect();

    for field in FieldKey::all() {
        let slot = field.slot();
        if live.contains(&slot) {
            continue;
        }
        match slot {
            Slot::Type => {}
            Slot::Query => next.query.clear(),
            Slot::Command => next.command = Command::Unset,
            Slot::Text(t) => next.clear_text(t),
            Slot::Integer(i) => next.clear_integer(i),
            Slot::Flag(f) => next.clear_flag(f),
        }
    }
    if next != *query {
        tracing::debug!(ref_id = %query.ref_id, "pruned hidden fields");
    }
    next
}

/// Entry point for widget callbacks.
#[derive(Debug, Clone, Default)]
pub struct QueryEditor {
    settings: EditorSettings,
}

impl QueryEditor {
    pub fn new(settings: EditorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Returns the document to hand to `on_change`. Rejected edits return
    /// an unchanged copy.
    pub fn on_change(&self, query: &Query, field: FieldKey, event: ChangeEvent) -> Query {
        self.edit(query, field, event.into_raw())
    }

    pub fn edit(&self, query: &Query, field: FieldKey, raw: RawValue) -> Query {
        tracing::debug!(ref_id = %query.ref_id, field = field.label(), value = %raw, "edit");
        if !self.settings.enforce_visibility {
            return apply(query, field, raw);
        }
        match try_apply(query, field, raw) {
            Ok(next) => next,
            Err(e) => {
                tracing::info!(ref_id = %query.ref_id, error = %e, "edit rejected");
                query.clone()
            }
        }
    }

    /// Switch the query type. Same as editing the type selector.
    pub fn set_type(&self, query: &Query, query_type: QueryType) -> Query {
        merge(query, FieldUpdate::Type(query_type))
    }
}
