use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

pub const DEFAULT_DISCOVER_BASE: &str = "/discover/index.html";

#[derive(Parser, Debug)]
#[command(
    name = "incident-validate",
    version,
    about = "Schema and consistency checks for incident report snapshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Validate(ValidateArgs),
    Schema(SchemaArgs),
}

/// How `bool` and `objectId` schema kinds are checked.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KindPolicy {
    /// Presence only.
    #[default]
    Literal,
    /// Presence plus value kind.
    Strict,
}

impl KindPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Strict => "strict",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long)]
    pub snapshot: PathBuf,

    #[arg(long)]
    pub schema_path: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub kind_policy: Option<KindPolicy>,

    #[arg(long, default_value = DEFAULT_DISCOVER_BASE)]
    pub discover_base: String,

    #[arg(long, default_value_t = false)]
    pub include_flagged: bool,

    #[arg(long = "incident")]
    pub incidents: Vec<i64>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, default_value_t = false)]
    pub fail_on_violations: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
}
