//! Command schema registry: which auxiliary parameters each command accepts.
//!
//! The table is a `static` built at compile time and never mutated. Lookups
//! are by command identity; unknown and unset commands have no capabilities.

pub mod catalog;

use serde::Serialize;

use crate::model::{Capability, Command, QueryType};

/// Static metadata for one known command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandDescriptor {
    pub command: Command,
    pub label: &'static str,
    pub description: &'static str,
    /// The query type whose command selector offers this command.
    pub query_type: QueryType,
    pub capabilities: &'static [Capability],
}

impl CommandDescriptor {
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

use Capability::{Aggregation, Field, Fill, Filter, Key, Legend, LegendLabel, Section, Size, ValueLabel};

static COMMANDS: &[CommandDescriptor] = &[
    // ── Redis ───────────────────────────────────────────────────
    CommandDescriptor {
        command: Command::ClientList,
        label: "CLIENT LIST",
        description: "Returns information and statistics about the client connections server",
        query_type: QueryType::Command,
        capabilities: &[],
    },
    CommandDescriptor {
        command: Command::Get,
        label: "GET",
        description: "Returns the value of key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::HGet,
        label: "HGET",
        description: "Returns the value associated with field in the hash stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key, Field],
    },
    CommandDescriptor {
        command: Command::HGetAll,
        label: "HGETALL",
        description: "Returns all fields and values of the hash stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::HKeys,
        label: "HKEYS",
        description: "Returns all field names in the hash stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::HLen,
        label: "HLEN",
        description: "Returns the number of fields contained in the hash stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::HMGet,
        label: "HMGET",
        description: "Returns the values associated with the specified fields in the hash stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key, Field],
    },
    CommandDescriptor {
        command: Command::Info,
        label: "INFO",
        description: "Returns information and statistics about the server",
        query_type: QueryType::Command,
        capabilities: &[Section],
    },
    CommandDescriptor {
        command: Command::LLen,
        label: "LLEN",
        description: "Returns the length of the list stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::SCard,
        label: "SCARD",
        description: "Returns the set cardinality (number of elements) of the set stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::SlowlogGet,
        label: "SLOWLOG GET",
        description: "Returns the Redis slow queries log",
        query_type: QueryType::Command,
        capabilities: &[Size],
    },
    CommandDescriptor {
        command: Command::SMembers,
        label: "SMEMBERS",
        description: "Returns all the members of the set value stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::Ttl,
        label: "TTL",
        description: "Returns the remaining time to live of a key that has a timeout",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::Type,
        label: "TYPE",
        description: "Returns the string representation of the type of the value stored at key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::XInfoStream,
        label: "XINFO STREAM",
        description: "Returns general information about the stream stored at the specified key",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::XLen,
        label: "XLEN",
        description: "Returns the number of entries inside a stream",
        query_type: QueryType::Command,
        capabilities: &[Key],
    },
    // ── RedisTimeSeries ─────────────────────────────────────────
    CommandDescriptor {
        command: Command::TsGet,
        label: "TS.GET",
        description: "Returns the last sample",
        query_type: QueryType::TimeSeries,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::TsInfo,
        label: "TS.INFO",
        description: "Returns information and statistics on the time-series",
        query_type: QueryType::TimeSeries,
        capabilities: &[Key],
    },
    CommandDescriptor {
        command: Command::TsMGet,
        label: "TS.MGET",
        description: "Returns the last samples matching the specific filter",
        query_type: QueryType::TimeSeries,
        capabilities: &[Filter, LegendLabel, ValueLabel],
    },
    CommandDescriptor {
        command: Command::TsMRange,
        label: "TS.MRANGE",
        description: "Query a timestamp range across multiple time-series by filters",
        query_type: QueryType::TimeSeries,
        capabilities: &[Filter, LegendLabel, ValueLabel, Aggregation, Fill],
    },
    CommandDescriptor {
        command: Command::TsQueryIndex,
        label: "TS.QUERYINDEX",
        description: "Query all the keys matching the filter list",
        query_type: QueryType::TimeSeries,
        capabilities: &[Filter],
    },
    CommandDescriptor {
        command: Command::TsRange,
        label: "TS.RANGE",
        description: "Query a range",
        query_type: QueryType::TimeSeries,
        capabilities: &[Key, Legend, Aggregation, Fill],
    },
];

/// Every known command, in selector order.
pub fn descriptors() -> &'static [CommandDescriptor] {
    COMMANDS
}

pub fn descriptor(command: &Command) -> Option<&'static CommandDescriptor> {
    if !command.is_known() {
        return None;
    }
    COMMANDS.iter().find(|d| d.command == *command)
}

/// Capabilities of a command. Unknown or unset commands support nothing.
pub fn capabilities_of(command: &Command) -> &'static [Capability] {
    descriptor(command).map_or(&[], |d| d.capabilities)
}

pub fn supports(command: &Command, capability: Capability) -> bool {
    capabilities_of(command).contains(&capability)
}

/// Known commands offered by the command selector for a query type.
pub fn commands_for(query_type: QueryType) -> impl Iterator<Item = &'static CommandDescriptor> {
    COMMANDS.iter().filter(move |d| d.query_type == query_type)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn every_known_command_has_exactly_one_descriptor() {
        for command in Command::known() {
            let count = COMMANDS.iter().filter(|d| d.command == *command).count();
            assert_eq!(count, 1, "{command} should be registered once");
        }
        assert_eq!(COMMANDS.len(), Command::known().len());
    }

    #[test]
    fn unknown_commands_support_nothing() {
        assert!(capabilities_of(&Command::from_name("gettt")).is_empty());
        assert!(capabilities_of(&Command::from_name("123")).is_empty());
        assert!(capabilities_of(&Command::Unset).is_empty());
        assert!(descriptor(&Command::Unknown("get ".into())).is_none());
    }

    #[test]
    fn capability_table_matches_editor() {
        assert!(supports(&Command::Get, Capability::Key));
        assert!(!supports(&Command::Get, Capability::Field));
        assert!(supports(&Command::HGet, Capability::Field));
        assert!(supports(&Command::TsMRange, Capability::Filter));
        assert!(supports(&Command::TsMRange, Capability::LegendLabel));
        assert!(supports(&Command::TsMRange, Capability::ValueLabel));
        assert!(!supports(&Command::TsMRange, Capability::Legend));
        assert!(supports(&Command::TsRange, Capability::Legend));
        assert!(supports(&Command::SlowlogGet, Capability::Size));
        assert!(supports(&Command::Info, Capability::Section));
        assert!(capabilities_of(&Command::ClientList).is_empty());
    }

    #[test]
    fn every_aggregating_command_can_fill() {
        for d in descriptors() {
            if d.supports(Capability::Aggregation) {
                assert!(d.supports(Capability::Fill), "{} lacks fill", d.command);
                assert_eq!(d.query_type, QueryType::TimeSeries);
            }
        }
    }

    #[test]
    fn selector_lists_are_split_by_type() {
        let ts: Vec<&str> = commands_for(QueryType::TimeSeries)
            .map(|d| d.command.name())
            .collect();
        assert!(ts.contains(&"ts.range"));
        assert!(!ts.contains(&"get"));
        assert_eq!(commands_for(QueryType::Cli).count(), 0);
    }
}
