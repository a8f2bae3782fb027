// CLI binary. Errors are reported on stderr and exit with status 1.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde_json::Value;

use redis_query_editor::event::{ChangeEvent, RawValue};
use redis_query_editor::form::{self, FieldView};
use redis_query_editor::model::{FieldKey, FieldValue, Query, QueryType};
use redis_query_editor::registry::catalog;
use redis_query_editor::settings::{self, EditorSettings};
use redis_query_editor::util::from_serde_str;
use redis_query_editor::{logging, paths, reducer, storage, EditorError, QueryEditor};

// ── CLI argument parsing ─────────────────────────────────────────

#[derive(Parser)]
#[command(name = "query-editor-cli", about = "Redis query editor, headless", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file override
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Output raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known commands and the parameters they take
    Commands {
        /// Only commands offered for this query type (cli, command, timeSeries)
        #[arg(long = "type", value_parser = parse_query_type)]
        query_type: Option<QueryType>,
    },
    /// Show the fields the editor displays for a query document
    Fields {
        /// Query document, or `-` for stdin
        file: String,
    },
    /// Change one field and print the resulting document
    Apply {
        /// Query document, or `-` for stdin
        file: String,
        /// Field id, e.g. keyName, bucket, fill
        #[arg(long, value_parser = parse_field)]
        field: FieldKey,
        /// New value, as JSON when it parses, otherwise as text
        #[arg(long, conflicts_with = "event", required_unless_present = "event")]
        value: Option<String>,
        /// Raw widget event as JSON, e.g. '{"target":{"value":"300"}}'
        #[arg(long)]
        event: Option<String>,
        /// Refuse edits to fields that are not shown
        #[arg(long)]
        strict: bool,
        /// Save the result back to the file
        #[arg(long)]
        write: bool,
    },
    /// Clear stored values of fields that are not shown
    Prune {
        /// Query document, or `-` for stdin
        file: String,
        /// Save the result back to the file
        #[arg(long)]
        write: bool,
    },
    /// Print the JSON Schema of the query document
    Schema,
}

fn parse_query_type(s: &str) -> Result<QueryType, String> {
    from_serde_str(s).ok_or_else(|| format!("unknown query type '{s}' (cli, command, timeSeries)"))
}

fn parse_field(s: &str) -> Result<FieldKey, String> {
    from_serde_str(s).ok_or_else(|| {
        let ids: Vec<String> = FieldKey::all()
            .iter()
            .filter_map(redis_query_editor::util::serde_variant_name)
            .collect();
        format!("unknown field '{s}', expected one of: {}", ids.join(", "))
    })
}

// ── Helpers ──────────────────────────────────────────────────────

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    process::exit(1);
}

fn load_editor_settings(override_path: Option<&Path>) -> EditorSettings {
    if let Some(path) = override_path {
        return settings::load_settings_file(path)
            .map_err(EditorError::from)
            .unwrap_or_else(|e| fail(format!("{}: {e}", path.display())));
    }
    paths::app_config_dir()
        .and_then(|dir| settings::load_settings(&dir))
        .unwrap_or_default()
}

fn read_query(file: &str) -> Query {
    if file == "-" {
        let mut input = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut input) {
            fail(EditorError::from(e));
        }
        return storage::parse_query(&input).unwrap_or_else(|e| fail(EditorError::from(e)));
    }
    storage::load_query(Path::new(file)).unwrap_or_else(|e| fail(format!("{file}: {e}")))
}

fn write_back(file: &str, query: &Query) {
    if file == "-" {
        fail("--write needs a file, not stdin");
    }
    if let Err(e) = storage::save_query(Path::new(file), query) {
        fail(format!("{file}: {e}"));
    }
}

fn parse_raw_value(input: &str) -> RawValue {
    serde_json::from_str(input).unwrap_or_else(|_| RawValue::Text(input.to_string()))
}

fn parse_event(input: &str) -> ChangeEvent {
    let json: Value = serde_json::from_str(input)
        .unwrap_or_else(|e| fail(format!("--event is not valid JSON: {e}")));
    ChangeEvent::from_json(&json).unwrap_or_else(|e| fail(e))
}

fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::QueryType(t) => redis_query_editor::util::serde_variant_name(t).unwrap_or_default(),
        FieldValue::Command(c) if c.is_unset() => "-".to_string(),
        FieldValue::Command(c) => c.to_string(),
        FieldValue::Text(Some(s)) if !s.is_empty() => s.clone(),
        FieldValue::Text(_) | FieldValue::Integer(None) => "-".to_string(),
        FieldValue::Integer(Some(n)) => n.to_string(),
        FieldValue::Bool(b) => b.to_string(),
    }
}

fn print_json(value: &impl serde::Serialize) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn print_form(fields: &indexmap::IndexMap<FieldKey, FieldView>) {
    for view in fields.values() {
        let line = format!("{:<14} {}", view.label, display_value(&view.value));
        match &view.default {
            Some(default) => println!("{line}  (default {})", display_value(default)),
            None => println!("{line}"),
        }
    }
}

// ── Main ─────────────────────────────────────────────────────────

fn main() {
    logging::init_logging(logging::DEFAULT_LEVEL);
    let cli = Cli::parse();
    let settings = load_editor_settings(cli.settings.as_deref());
    let raw_json = cli.json;

    match cli.command {
        Commands::Commands { query_type } => {
            if raw_json {
                let mut list = catalog::to_json();
                if let (Some(t), Value::Array(entries)) = (query_type, &mut list) {
                    let wanted = serde_json::to_value(t).unwrap_or(Value::Null);
                    entries.retain(|e| e["type"] == wanted);
                }
                print_json(&list);
            } else {
                println!("{}", catalog::help_text(query_type));
            }
        }
        Commands::Fields { file } => {
            let query = read_query(&file);
            let fields = form::resolve_form(&query, &settings);
            if raw_json {
                print_json(&fields);
            } else {
                print_form(&fields);
            }
        }
        Commands::Apply {
            file,
            field,
            value,
            event,
            strict,
            write,
        } => {
            let query = read_query(&file);
            let raw = match (value, event) {
                (Some(v), _) => parse_raw_value(&v),
                (None, Some(e)) => parse_event(&e).into_raw(),
                (None, None) => fail("either --value or --event is required"),
            };
            let next = if strict {
                reducer::try_apply(&query, field, raw).unwrap_or_else(|e| fail(e))
            } else {
                QueryEditor::new(settings).edit(&query, field, raw)
            };
            if write {
                write_back(&file, &next);
            }
            print_json(&next);
        }
        Commands::Prune { file, write } => {
            let query = read_query(&file);
            let next = reducer::prune(&query);
            if write {
                write_back(&file, &next);
            }
            print_json(&next);
        }
        Commands::Schema => print_json(&catalog::query_schema()),
    }
}
