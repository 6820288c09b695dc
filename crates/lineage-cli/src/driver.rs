//! Command dispatch.

use crate::args::{CliArgs, Command, OutputFormat};
use crate::hierarchy::Hierarchy;
use crate::output::{BindingsReport, PathReport};
use anyhow::{Context, Result};
use lineage_solver::{find_path, resolve_type_vars};

/// Load the hierarchy named by `args` and run its command.
pub fn run(args: &CliArgs) -> Result<String> {
    let hierarchy = Hierarchy::load(&args.hierarchy)?;
    run_command(&hierarchy, &args.command, args.format)
}

/// Run one command against an already loaded hierarchy, returning the
/// rendered output.
pub fn run_command(hierarchy: &Hierarchy, command: &Command, format: OutputFormat) -> Result<String> {
    let table = hierarchy.table();
    match command {
        Command::Path {
            descendant,
            ancestor,
            no_generics,
        } => {
            let descendant_id = hierarchy.class(descendant)?;
            let ancestor_id = hierarchy.class(ancestor)?;
            let with_generics = !no_generics;
            let path = find_path(table, descendant_id, ancestor_id, with_generics)
                .with_context(|| format!("no inheritance path from `{descendant}` to `{ancestor}`"))?;
            PathReport::new(table, descendant_id, ancestor_id, with_generics, &path).render(format)
        }
        Command::Resolve {
            ancestor,
            descendant,
        } => {
            let ancestor_id = hierarchy.class(ancestor)?;
            let descendant_id = hierarchy.class(descendant)?;
            let bindings = resolve_type_vars(table, hierarchy.class_type(ancestor)?, descendant_id)
                .with_context(|| {
                    format!("cannot resolve type variables of `{ancestor}` in `{descendant}`")
                })?;
            BindingsReport::new(table, ancestor_id, descendant_id, &bindings).render(format)
        }
    }
}
