use serde::{Deserialize, Serialize};

/// Single source of truth for known command names. Generates:
/// 1. `Command` enum (known variants + `Unset` + `Unknown`)
/// 2. `Command::name()`: the wire name
/// 3. `Command::from_name()`: total, case-sensitive parse
/// 4. `Command::known()`: every known variant, in declaration order
macro_rules! define_commands {
    ( $( $variant:ident => $name:literal ; )* ) => {
        /// Identity of a structured command.
        ///
        /// Stored on the wire as its name. An empty name is `Unset`; a name that
        /// matches no known command is kept verbatim in `Unknown` so the document
        /// round-trips unchanged.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum Command {
            $( $variant, )*
            #[default]
            Unset,
            Unknown(String),
        }

        impl Command {
            pub fn name(&self) -> &str {
                match self {
                    $( Command::$variant => $name, )*
                    Command::Unset => "",
                    Command::Unknown(name) => name,
                }
            }

            pub fn from_name(name: &str) -> Self {
                match name {
                    "" => Command::Unset,
                    $( $name => Command::$variant, )*
                    other => Command::Unknown(other.to_string()),
                }
            }

            pub fn known() -> &'static [Command] {
                &[ $( Command::$variant, )* ]
            }
        }
    };
}

define_commands! {
    // ── Redis ───────────────────────────────────────────────────
    ClientList => "clientList";
    Get => "get";
    HGet => "hget";
    HGetAll => "hgetall";
    HKeys => "hkeys";
    HLen => "hlen";
    HMGet => "hmget";
    Info => "info";
    LLen => "llen";
    SCard => "scard";
    SlowlogGet => "slowlogGet";
    SMembers => "smembers";
    Ttl => "ttl";
    Type => "type";
    XInfoStream => "xinfoStream";
    XLen => "xlen";
    // ── RedisTimeSeries ─────────────────────────────────────────
    TsGet => "ts.get";
    TsInfo => "ts.info";
    TsMGet => "ts.mget";
    TsMRange => "ts.mrange";
    TsQueryIndex => "ts.queryindex";
    TsRange => "ts.range";
}

impl Command {
    pub fn is_unset(&self) -> bool {
        matches!(self, Command::Unset)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Command::Unset | Command::Unknown(_))
    }
}

impl From<String> for Command {
    fn from(name: String) -> Self {
        match Command::from_name(&name) {
            Command::Unknown(_) => Command::Unknown(name),
            known => known,
        }
    }
}

impl From<Command> for String {
    fn from(command: Command) -> String {
        match command {
            Command::Unknown(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for command in Command::known() {
            assert_eq!(&Command::from_name(command.name()), command);
        }
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        assert_eq!(Command::from_name("hget"), Command::HGet);
        assert_eq!(Command::from_name("HGET"), Command::Unknown("HGET".into()));
        assert_eq!(Command::from_name("slowlogGet"), Command::SlowlogGet);
        assert_eq!(Command::from_name("slowlogget"), Command::Unknown("slowlogget".into()));
        assert_eq!(Command::from_name("123"), Command::Unknown("123".into()));
    }

    #[test]
    fn empty_name_is_unset() {
        assert_eq!(Command::from_name(""), Command::Unset);
        assert!(Command::Unset.is_unset());
        assert!(!Command::Unset.is_known());
        assert_eq!(Command::Unset.name(), "");
    }

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(serde_json::to_value(Command::TsMRange).unwrap(), "ts.mrange");
        let parsed: Command = serde_json::from_str("\"xinfoStream\"").unwrap();
        assert_eq!(parsed, Command::XInfoStream);
    }
}
