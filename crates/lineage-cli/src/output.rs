//! Rendering of query results as text or JSON.

use crate::args::OutputFormat;
use anyhow::{Context, Result};
use lineage_solver::{
    ClassDatabase, ClassId, InheritancePath, PathNode, TypeFormatter, TypeVarBindings,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PathReport {
    pub descendant: String,
    pub ancestor: String,
    pub with_generics: bool,
    pub path: Vec<PathEntry>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathEntry {
    Class { name: String },
    Application { name: String },
}

impl PathEntry {
    fn name(&self) -> &str {
        match self {
            PathEntry::Class { name } | PathEntry::Application { name } => name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BindingsReport {
    pub ancestor: String,
    pub descendant: String,
    pub bindings: Vec<BindingEntry>,
}

#[derive(Debug, Serialize)]
pub struct BindingEntry {
    pub param: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: &'static str,
}

impl PathReport {
    pub fn new(
        db: &dyn ClassDatabase,
        descendant: ClassId,
        ancestor: ClassId,
        with_generics: bool,
        path: &InheritancePath,
    ) -> Self {
        let formatter = TypeFormatter::new(db);
        let path = path
            .iter()
            .map(|node| match node {
                PathNode::Class(class) => PathEntry::Class {
                    name: formatter.class_name(class),
                },
                PathNode::Application(_) => PathEntry::Application {
                    name: formatter.format_node(node),
                },
            })
            .collect();
        PathReport {
            descendant: formatter.class_name(descendant),
            ancestor: formatter.class_name(ancestor),
            with_generics,
            path,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let names: Vec<&str> = self.path.iter().map(PathEntry::name).collect();
                Ok(format!("{}\n", names.join(" -> ")))
            }
            OutputFormat::Json => to_json(self),
        }
    }
}

impl BindingsReport {
    pub fn new(
        db: &dyn ClassDatabase,
        ancestor: ClassId,
        descendant: ClassId,
        resolved: &TypeVarBindings,
    ) -> Self {
        let formatter = TypeFormatter::new(db);
        let bindings = resolved
            .iter()
            .map(|(param, type_id)| BindingEntry {
                param: formatter.param_name(param),
                type_name: formatter.format(type_id),
                kind: resolved
                    .classify(db, param)
                    .map_or("unknown", |kind| kind.as_str()),
            })
            .collect();
        BindingsReport {
            ancestor: formatter.class_name(ancestor),
            descendant: formatter.class_name(descendant),
            bindings,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self
                .bindings
                .iter()
                .map(|entry| format!("{} = {}\n", entry.param, entry.type_name))
                .collect()),
            OutputFormat::Json => to_json(self),
        }
    }
}

fn to_json<T: Serialize>(report: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    json.push('\n');
    Ok(json)
}
