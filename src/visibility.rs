//! Which fields the editor shows for a given document.
//!
//! Visibility is computed from raw stored values on every call and never
//! cached. A field that is hidden keeps whatever value it had.

use crate::model::{Capability, FieldKey, Query, QueryType};
use crate::registry;
use crate::streaming::{self, StreamingField};

pub fn is_visible(field: FieldKey, query: &Query) -> bool {
    if let Some(sf) = StreamingField::from_key(field) {
        return streaming::is_visible(sf, query);
    }
    if field.is_command_specific() && query.query_type == QueryType::Cli {
        return false;
    }
    match field {
        FieldKey::Type => true,
        FieldKey::Query => query.query_type == QueryType::Cli,
        FieldKey::Command => query.query_type != QueryType::Cli,
        FieldKey::Aggregation => aggregation_visible(query),
        FieldKey::Bucket => bucket_visible(query),
        FieldKey::Fill => {
            bucket_visible(query)
                && query.has_bucket()
                && command_supports(query, Capability::Fill)
        }
        _ => field
            .capability()
            .is_some_and(|cap| command_supports(query, cap)),
    }
}

/// Visible fields in display order.
pub fn visible_fields(query: &Query) -> Vec<FieldKey> {
    FieldKey::all()
        .iter()
        .copied()
        .filter(|f| is_visible(*f, query))
        .collect()
}

fn command_supports(query: &Query, capability: Capability) -> bool {
    registry::supports(&query.command, capability)
}

fn aggregation_visible(query: &Query) -> bool {
    query.query_type == QueryType::TimeSeries && command_supports(query, Capability::Aggregation)
}

fn bucket_visible(query: &Query) -> bool {
    aggregation_visible(query) && query.has_aggregation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Command, Integer};

    fn with(query_type: QueryType, command: Command) -> Query {
        Query {
            query_type,
            command,
            ..Query::default()
        }
    }

    #[test]
    fn type_is_always_visible() {
        for t in QueryType::all() {
            assert!(is_visible(FieldKey::Type, &with(*t, Command::Unset)));
        }
    }

    #[test]
    fn query_and_command_are_exclusive() {
        for t in QueryType::all() {
            let q = with(*t, Command::Get);
            assert_ne!(is_visible(FieldKey::Query, &q), is_visible(FieldKey::Command, &q));
        }
        assert!(is_visible(FieldKey::Query, &with(QueryType::Cli, Command::Unset)));
    }

    #[test]
    fn unknown_command_shows_no_specific_fields() {
        for name in ["", "gettt", "123", "GET"] {
            let q = with(QueryType::Command, Command::from_name(name));
            let shown: Vec<_> = visible_fields(&q)
                .into_iter()
                .filter(|f| f.is_command_specific())
                .collect();
            assert!(shown.is_empty(), "{name:?} showed {shown:?}");
        }
    }

    #[test]
    fn get_and_hget_fields() {
        let get = with(QueryType::Command, Command::Get);
        assert!(is_visible(FieldKey::KeyName, &get));
        assert!(!is_visible(FieldKey::Field, &get));

        let hget = with(QueryType::Command, Command::HGet);
        assert!(is_visible(FieldKey::KeyName, &hget));
        assert!(is_visible(FieldKey::Field, &hget));
    }

    #[test]
    fn cli_hides_command_fields_even_with_stale_command() {
        let q = with(QueryType::Cli, Command::HGet);
        assert!(!is_visible(FieldKey::KeyName, &q));
        assert!(!is_visible(FieldKey::Field, &q));
        assert!(!is_visible(FieldKey::Command, &q));

        let mut ts = with(QueryType::Cli, Command::TsRange);
        ts.aggregation = Some("avg".into());
        ts.bucket = Some(Integer::Value(300));
        for field in [FieldKey::Aggregation, FieldKey::Bucket, FieldKey::Fill, FieldKey::Legend] {
            assert!(!is_visible(field, &ts), "{field:?}");
        }
    }

    #[test]
    fn aggregation_chain() {
        let mut q = with(QueryType::TimeSeries, Command::TsRange);
        assert!(is_visible(FieldKey::Aggregation, &q));
        assert!(!is_visible(FieldKey::Bucket, &q));
        assert!(!is_visible(FieldKey::Fill, &q));

        q.aggregation = Some(String::new());
        assert!(!is_visible(FieldKey::Bucket, &q));

        q.aggregation = Some("avg".into());
        assert!(is_visible(FieldKey::Bucket, &q));
        assert!(!is_visible(FieldKey::Fill, &q));

        q.bucket = Some(Integer::Value(0));
        assert!(!is_visible(FieldKey::Fill, &q));
        q.bucket = Some(Integer::NotANumber);
        assert!(!is_visible(FieldKey::Fill, &q));
        q.bucket = Some(Integer::Value(300));
        assert!(is_visible(FieldKey::Fill, &q));
    }

    #[test]
    fn aggregation_needs_time_series_type() {
        let mut q = with(QueryType::Command, Command::TsRange);
        q.aggregation = Some("avg".into());
        q.bucket = Some(Integer::Value(300));
        assert!(!is_visible(FieldKey::Aggregation, &q));
        assert!(!is_visible(FieldKey::Bucket, &q));
        assert!(!is_visible(FieldKey::Fill, &q));
        // The key still shows: only aggregation is tied to the type.
        assert!(is_visible(FieldKey::KeyName, &q));
    }

    #[test]
    fn stale_bucket_without_aggregation_hides_fill() {
        let mut q = with(QueryType::TimeSeries, Command::TsMRange);
        q.bucket = Some(Integer::Value(60));
        assert!(!is_visible(FieldKey::Bucket, &q));
        assert!(!is_visible(FieldKey::Fill, &q));
    }

    #[test]
    fn label_fields_follow_capabilities() {
        let mrange = with(QueryType::TimeSeries, Command::TsMRange);
        assert!(is_visible(FieldKey::LegendLabel, &mrange));
        assert!(is_visible(FieldKey::ValueLabel, &mrange));
        assert!(!is_visible(FieldKey::Legend, &mrange));

        let range = with(QueryType::TimeSeries, Command::TsRange);
        assert!(is_visible(FieldKey::Legend, &range));
        assert!(!is_visible(FieldKey::LegendLabel, &range));
    }

    #[test]
    fn streaming_depends_only_on_row() {
        let mut q = with(QueryType::Cli, Command::Unset);
        assert!(is_visible(FieldKey::Streaming, &q));
        q.streaming = Some(true);
        assert!(is_visible(FieldKey::StreamingInterval, &q));
        q.ref_id = "B".into();
        assert!(!is_visible(FieldKey::Streaming, &q));
        assert!(!is_visible(FieldKey::StreamingInterval, &q));
    }

    #[test]
    fn visible_fields_keep_display_order() {
        let mut q = with(QueryType::TimeSeries, Command::TsRange);
        q.aggregation = Some("avg".into());
        q.bucket = Some(Integer::Value(300));
        assert_eq!(
            visible_fields(&q),
            vec![
                FieldKey::Type,
                FieldKey::Command,
                FieldKey::KeyName,
                FieldKey::Legend,
                FieldKey::Aggregation,
                FieldKey::Bucket,
                FieldKey::Fill,
                FieldKey::Streaming,
            ]
        );
    }
}
