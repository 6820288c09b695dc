use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::tracing_config::LogFormat;

/// CLI arguments for the lineage binary.
#[derive(Parser, Debug)]
#[command(
    name = "lineage",
    version,
    about = "Inheritance paths and generic type variable resolution over a class hierarchy"
)]
pub struct CliArgs {
    /// Hierarchy file (JSON) describing the classes and their bases.
    #[arg(short = 'H', long)]
    pub hierarchy: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Log the lineage crates to stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format [default: $LINEAGE_LOG_FORMAT or text].
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the inheritance path from DESCENDANT up to ANCESTOR.
    Path {
        descendant: String,
        ancestor: String,
        /// Follow plain bases only, dropping specialization edges.
        #[arg(long)]
        no_generics: bool,
    },
    /// Print what ANCESTOR's type parameters are bound to in DESCENDANT.
    Resolve { ancestor: String, descendant: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
