//! Tracing configuration for the `lineage` binary.
//!
//! Logging stays off unless one of these is given, in order of precedence:
//!
//! - `LINEAGE_LOG`: a bare level (`debug`, `trace`) is scoped to the lineage
//!   crates; anything with a target (`lineage_solver=trace,warn`) is used as-is
//! - `-v` / `-vv` on the command line: debug / trace for the lineage crates
//! - `RUST_LOG`: a plain `EnvFilter` directive string
//!
//! The output format comes from `--log-format`, then `LINEAGE_LOG_FORMAT`,
//! then defaults to `text`. `tree` renders one indentation level per
//! `find_path` / `resolve_type_vars` span, which is the easiest way to watch
//! the search expand:
//!
//! ```bash
//! lineage -vv --log-format tree -H h.json resolve A1 C
//! LINEAGE_LOG=lineage_solver=debug LINEAGE_LOG_FORMAT=json lineage -H h.json path C A1
//! ```
//!
//! Everything is written to stderr so query results on stdout stay clean.

use clap::ValueEnum;
use tracing::Subscriber;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, fmt};
use tracing_tree::HierarchicalLayer;

use crate::args::CliArgs;

/// Targets a bare level or `-v` applies to.
const LINEAGE_TARGETS: [&str; 2] = ["lineage_solver", "lineage_cli"];

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Flat `tracing-subscriber` lines.
    Text,
    /// Indented span tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parse a `LINEAGE_LOG_FORMAT` value; anything unrecognized is `Text`.
    pub fn parse(value: &str) -> Self {
        Self::from_str(value.trim(), true).unwrap_or(Self::Text)
    }

    fn from_env() -> Self {
        std::env::var("LINEAGE_LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or(Self::Text)
    }
}

/// Filter directives for the given sources, or `None` when logging is off.
pub fn filter_directives(
    verbose: u8,
    lineage_log: Option<&str>,
    rust_log: Option<&str>,
) -> Option<String> {
    if let Some(value) = lineage_log.map(str::trim).filter(|v| !v.is_empty()) {
        if value.contains('=') || value.contains(',') {
            return Some(value.to_string());
        }
        return Some(scoped(value));
    }
    match verbose {
        0 => rust_log
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        1 => Some(scoped("debug")),
        _ => Some(scoped("trace")),
    }
}

fn scoped(level: &str) -> String {
    LINEAGE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn output_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Tree => HierarchicalLayer::new(2)
            .with_indent_lines(true)
            .with_targets(true)
            .with_deferred_spans(true)
            .boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
    }
}

/// Install the global subscriber for this invocation, if logging is enabled.
pub fn init_tracing(args: &CliArgs) {
    let lineage_log = std::env::var("LINEAGE_LOG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let Some(directives) =
        filter_directives(args.verbose, lineage_log.as_deref(), rust_log.as_deref())
    else {
        return;
    };

    let format = args.log_format.unwrap_or_else(LogFormat::from_env);
    tracing_subscriber::registry()
        .with(EnvFilter::builder().parse_lossy(directives))
        .with(output_layer(format))
        .init();
}
