//! Hierarchy file loading.
//!
//! A hierarchy file lists classes in declaration order:
//!
//! ```json
//! {
//!   "classes": [
//!     { "name": "A1", "params": ["T", "S"] },
//!     { "name": "B1", "params": ["T"], "bases": ["A1[Iterable[T], Union[T, str]]"] },
//!     { "name": "C", "bases": ["B1[Optional[int]]"] }
//!   ]
//! }
//! ```
//!
//! Names inside a class's base strings resolve, in order, to that class's own
//! parameters, to classes declared so far, and to the `Union`, `Optional`,
//! `Tuple` and `Callable` constructors. Any other subscripted name becomes an
//! opaque container (`Iterable[T]`); any other bare name is declared on the
//! spot as a leaf class (`int`, `str`).

use crate::type_syntax::{TypeExpr, parse_type};
use anyhow::{Context, Result, bail};
use lineage_solver::visitor::base_class_of;
use lineage_solver::{ClassDatabase, ClassId, ClassTable, CompositeKind, TypeId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HierarchyFile {
    pub classes: Vec<ClassEntry>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub bases: Vec<String>,
    /// Overrides the plain base list derived from `bases`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_bases: Option<Vec<String>>,
}

/// A loaded hierarchy, ready for queries.
pub struct Hierarchy {
    table: ClassTable,
}

impl Hierarchy {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read hierarchy file {}", path.display()))?;
        let hierarchy = Self::from_json(&text)
            .with_context(|| format!("failed to load hierarchy file {}", path.display()))?;
        info!(path = %path.display(), classes = hierarchy.table.len(), "loaded hierarchy");
        Ok(hierarchy)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: HierarchyFile =
            serde_json::from_str(text).context("malformed hierarchy JSON")?;
        Self::from_file(&file)
    }

    pub fn from_file(file: &HierarchyFile) -> Result<Self> {
        let mut builder = Builder::default();
        for entry in &file.classes {
            builder
                .add_class(entry)
                .with_context(|| format!("in class `{}`", entry.name))?;
        }
        Ok(Hierarchy {
            table: builder.table,
        })
    }

    pub fn table(&self) -> &ClassTable {
        &self.table
    }

    /// Look up a class by name.
    pub fn class(&self, name: &str) -> Result<ClassId> {
        match self.table.find_class(name) {
            Some(class) => Ok(class),
            None => bail!("unknown class `{name}`"),
        }
    }

    /// The class's plain type, the form the resolver takes as ancestor.
    pub fn class_type(&self, name: &str) -> Result<TypeId> {
        Ok(self.table.class_type(self.class(name)?))
    }
}

#[derive(Default)]
struct Builder {
    table: ClassTable,
    /// Names declared by an entry of the file.
    declared: FxHashSet<String>,
    /// Names declared implicitly as leaf classes by a base string.
    implicit: FxHashSet<String>,
}

impl Builder {
    fn add_class(&mut self, entry: &ClassEntry) -> Result<()> {
        if self.declared.contains(&entry.name) {
            bail!("class `{}` is declared twice", entry.name);
        }
        if self.implicit.contains(&entry.name) {
            bail!(
                "class `{}` is declared after being used as a base",
                entry.name
            );
        }
        let mut seen = FxHashSet::default();
        for param in &entry.params {
            if !seen.insert(param.as_str()) {
                bail!("type parameter `{param}` is declared twice");
            }
        }

        let params: Vec<&str> = entry.params.iter().map(String::as_str).collect();
        let class = self.table.declare_class(&entry.name, &params);
        self.declared.insert(entry.name.clone());

        for base in &entry.bases {
            let expr = parse_type(base)?;
            let base_type = self
                .lower(class, &expr)
                .with_context(|| format!("in base `{base}`"))?;
            if base_class_of(self.table.types(), base_type) == Some(class) {
                bail!("class `{}` cannot inherit from itself", entry.name);
            }
            self.table
                .declare_base(class, base_type)
                .with_context(|| format!("in base `{base}`"))?;
        }

        if let Some(plain) = &entry.plain_bases {
            let plain = plain
                .iter()
                .map(|name| match self.table.find_class(name) {
                    Some(base) if base == class => {
                        bail!("class `{}` cannot inherit from itself", entry.name)
                    }
                    Some(base) => Ok(base),
                    None => bail!("unknown plain base `{name}`"),
                })
                .collect::<Result<Vec<_>>>()?;
            self.table.set_plain_bases(class, &plain);
        }

        debug!(class = %entry.name, bases = entry.bases.len(), "declared class");
        Ok(())
    }

    /// Resolve a parsed expression in the scope of `owner`.
    fn lower(&mut self, owner: ClassId, expr: &TypeExpr) -> Result<TypeId> {
        match expr {
            TypeExpr::Named { name, args: None } => self.lower_name(owner, name),
            TypeExpr::Named {
                name,
                args: Some(args),
            } => self.lower_subscript(owner, name, args),
            TypeExpr::List(_) => bail!("a bracketed list is only allowed in `Callable`"),
            TypeExpr::Unit => bail!("`()` is only allowed in `Tuple[()]`"),
        }
    }

    fn lower_name(&mut self, owner: ClassId, name: &str) -> Result<TypeId> {
        if let Some(param) = self.table.find_param(owner, name) {
            return Ok(self.table.param_type(param));
        }
        if let Some(class) = self.table.find_class(name) {
            return Ok(self.table.class_type(class));
        }
        if matches!(name, "Union" | "Optional" | "Tuple" | "Callable") {
            bail!("`{name}` needs type arguments");
        }
        let class = self.table.declare_class(name, &[]);
        self.implicit.insert(name.to_string());
        debug!(name, "declared leaf class");
        Ok(self.table.class_type(class))
    }

    fn lower_subscript(&mut self, owner: ClassId, name: &str, args: &[TypeExpr]) -> Result<TypeId> {
        if self.table.find_param(owner, name).is_some() {
            bail!("type parameter `{name}` cannot take arguments");
        }

        if let Some(class) = self.table.find_class(name) {
            let expected = self.table.type_params(class).len();
            if expected != args.len() {
                bail!(
                    "`{name}` expects {expected} type argument(s), found {}",
                    args.len()
                );
            }
            let args = self.lower_all(owner, args)?;
            return Ok(self.table.application(class, &args));
        }

        let kind = match name {
            "Union" => CompositeKind::Union,
            "Optional" => {
                if args.len() != 1 {
                    bail!("`Optional` takes exactly one argument");
                }
                CompositeKind::Optional
            }
            "Tuple" => {
                if let [TypeExpr::Unit] = args {
                    return Ok(self.table.composite(CompositeKind::Tuple, &[]));
                }
                CompositeKind::Tuple
            }
            "Callable" => return self.lower_callable(owner, args),
            _ => {
                let members = self.lower_all(owner, args)?;
                return Ok(self.table.types().container(name, &members));
            }
        };
        let members = self.lower_all(owner, args)?;
        Ok(self.table.composite(kind, &members))
    }

    fn lower_callable(&mut self, owner: ClassId, args: &[TypeExpr]) -> Result<TypeId> {
        let [TypeExpr::List(params), ret] = args else {
            bail!("`Callable` takes a parameter list and a return type");
        };
        let params = self.lower_all(owner, params)?;
        let ret = self.lower(owner, ret)?;
        Ok(self.table.types().callable(&params, ret))
    }

    fn lower_all(&mut self, owner: ClassId, exprs: &[TypeExpr]) -> Result<Vec<TypeId>> {
        exprs.iter().map(|expr| self.lower(owner, expr)).collect()
    }
}
