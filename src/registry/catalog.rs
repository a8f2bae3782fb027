use std::borrow::Cow;

use schemars::schema_for;
use serde::Serialize;
use serde_json::Value;

use super::commands_for;
use crate::model::{FieldKey, Query, QueryType};

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: Cow<'static, str>,
    pub label: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
}

const fn option(value: &'static str, label: &'static str, description: &'static str) -> SelectOption {
    SelectOption {
        value: Cow::Borrowed(value),
        label,
        description,
    }
}

/// RedisTimeSeries aggregation functions.
pub const AGGREGATIONS: &[SelectOption] = &[
    option("avg", "Avg", "Arithmetic mean of all values"),
    option("count", "Count", "Number of reported values"),
    option("first", "First", "Value with the lowest timestamp in the bucket"),
    option("last", "Last", "Value with the highest timestamp in the bucket"),
    option("max", "Max", "Maximum value"),
    option("min", "Min", "Minimum value"),
    option("range", "Range", "Diff between maximum and minimum in the bucket"),
    option("std.p", "Std.p", "Population standard deviation of the values"),
    option("std.s", "Std.s", "Sample standard deviation of the values"),
    option("sum", "Sum", "Sum of all values"),
    option("var.p", "Var.p", "Population variance of the values"),
    option("var.s", "Var.s", "Sample variance of the values"),
];

/// Sections accepted by `INFO`.
pub const INFO_SECTIONS: &[SelectOption] = &[
    option("server", "Server", "General information about the Redis server"),
    option("clients", "Clients", "Client connections section"),
    option("memory", "Memory", "Memory consumption related information"),
    option("persistence", "Persistence", "RDB and AOF related information"),
    option("stats", "Stats", "General statistics"),
    option("replication", "Replication", "Master/replica replication information"),
    option("cpu", "CPU", "CPU consumption statistics"),
    option("commandstats", "Command Stats", "Redis command statistics"),
    option("cluster", "Cluster", "Redis Cluster section"),
    option("keyspace", "Keyspace", "Database related statistics"),
];

pub fn query_type_options() -> Vec<SelectOption> {
    QueryType::all()
        .iter()
        .filter_map(|t| {
            let value = crate::util::serde_variant_name(t)?;
            Some(SelectOption {
                value: Cow::Owned(value),
                label: t.label(),
                description: t.description(),
            })
        })
        .collect()
}

/// Commands offered by the command selector for a query type.
pub fn command_options(query_type: QueryType) -> Vec<SelectOption> {
    commands_for(query_type)
        .map(|d| SelectOption {
            value: Cow::Borrowed(d.command.name()),
            label: d.label,
            description: d.description,
        })
        .collect()
}

/// Options for a select field, given the query's current type.
/// Non-select fields have none.
pub fn options_for(field: FieldKey, query_type: QueryType) -> Vec<SelectOption> {
    match field {
        FieldKey::Type => query_type_options(),
        FieldKey::Command => command_options(query_type),
        FieldKey::Aggregation => AGGREGATIONS.to_vec(),
        FieldKey::Section => INFO_SECTIONS.to_vec(),
        _ => Vec::new(),
    }
}

pub(crate) fn empty_object_schema() -> Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

/// JSON Schema of the persisted query document.
pub fn query_schema() -> Value {
    let root = schema_for!(Query);
    serde_json::to_value(root).unwrap_or_else(|_| empty_object_schema())
}

/// The registry as JSON, one entry per known command.
pub fn to_json() -> Value {
    Value::Array(
        super::descriptors()
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": d.command.name(),
                    "label": d.label,
                    "description": d.description,
                    "type": d.query_type,
                    "capabilities": d.capabilities,
                })
            })
            .collect(),
    )
}

/// Human-readable registry listing, optionally filtered by query type.
pub fn help_text(query_type: Option<QueryType>) -> String {
    let mut lines = Vec::new();
    for t in QueryType::all() {
        if query_type.is_some_and(|wanted| wanted != *t) {
            continue;
        }
        let commands: Vec<_> = commands_for(*t).collect();
        if commands.is_empty() {
            continue;
        }
        lines.push(format!("{} ({}):", t.label(), commands.len()));
        for d in commands {
            let caps: Vec<String> = d
                .capabilities
                .iter()
                .filter_map(crate::util::serde_variant_name)
                .collect();
            let caps = if caps.is_empty() {
                "-".to_string()
            } else {
                caps.join(", ")
            };
            lines.push(format!("  {:<14} {caps}", d.command.name()));
        }
    }
    if lines.is_empty() {
        lines.push("No structured commands for this query type.".to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn command_selector_follows_query_type() {
        let redis = command_options(QueryType::Command);
        assert!(redis.iter().any(|o| o.value == "hget"));
        assert!(redis.iter().all(|o| !o.value.starts_with("ts.")));

        let ts = command_options(QueryType::TimeSeries);
        assert!(ts.iter().all(|o| o.value.starts_with("ts.")));
        assert!(command_options(QueryType::Cli).is_empty());
    }

    #[test]
    fn select_fields_have_options() {
        assert_eq!(options_for(FieldKey::Type, QueryType::Cli).len(), 3);
        assert!(options_for(FieldKey::Aggregation, QueryType::TimeSeries)
            .iter()
            .any(|o| o.value == "avg"));
        assert!(options_for(FieldKey::Section, QueryType::Command)
            .iter()
            .any(|o| o.value == "commandstats"));
        assert!(options_for(FieldKey::KeyName, QueryType::Command).is_empty());
    }

    #[test]
    fn type_option_values_deserialize() {
        let values: Vec<String> = query_type_options()
            .into_iter()
            .map(|o| o.value.into_owned())
            .collect();
        assert_eq!(values, vec!["command", "timeSeries", "cli"]);
        for opt in query_type_options() {
            let parsed: QueryType = crate::util::from_serde_str(&opt.value).expect(&opt.value);
            assert_eq!(parsed.label(), opt.label);
        }
    }

    #[test]
    fn schema_describes_query_document() {
        let schema = query_schema();
        let props = &schema["properties"];
        assert!(props.get("refId").is_some());
        assert!(props.get("type").is_some());
        assert!(props.get("streamingCapacity").is_some());
        assert_eq!(props["command"]["type"], "string");
    }

    #[test]
    fn registry_json_lists_every_command() {
        let json = to_json();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), crate::model::Command::known().len());
        let mrange = entries.iter().find(|e| e["name"] == "ts.mrange").unwrap();
        assert_eq!(mrange["type"], "timeSeries");
        assert!(mrange["capabilities"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("aggregation")));
    }

    #[test]
    fn help_text_filters_by_type() {
        let text = help_text(Some(QueryType::TimeSeries));
        assert!(text.contains("ts.mrange"));
        assert!(!text.contains("hgetall"));
        assert!(help_text(Some(QueryType::Cli)).contains("No structured commands"));
    }
}
