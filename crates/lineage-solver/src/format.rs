//! Display of type expressions and path nodes.
//!
//! Output uses subscript syntax: `A1[Iterable[T], Union[T, str]]`,
//! `Optional[int]`, `Callable[[int, str], bool]`. Parameters print by their
//! declared name. Handles the database cannot name print as `#<id>`.

use crate::db::ClassDatabase;
use crate::types::{ClassId, CompositeKind, PathNode, TypeData, TypeId, TypeParamId};
use lineage_common::interner::Atom;
use std::fmt::Write;

pub struct TypeFormatter<'a> {
    db: &'a dyn ClassDatabase,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a dyn ClassDatabase) -> Self {
        TypeFormatter { db }
    }

    pub fn format(&self, type_id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, type_id);
        out
    }

    pub fn format_node(&self, node: PathNode) -> String {
        match node {
            PathNode::Class(class) => self.class_name(class),
            PathNode::Application(type_id) => self.format(type_id),
        }
    }

    pub fn class_name(&self, class: ClassId) -> String {
        self.atom_or_id(self.db.class_name(class), class.0)
    }

    pub fn param_name(&self, param: TypeParamId) -> String {
        self.atom_or_id(self.db.param_name(param), param.0)
    }

    fn atom_or_id(&self, atom: Option<Atom>, id: u32) -> String {
        match atom {
            Some(atom) => self.db.types().resolve_atom(atom),
            None => format!("#{id}"),
        }
    }

    fn write_type(&self, out: &mut String, type_id: TypeId) {
        let types = self.db.types();
        match types.lookup(type_id) {
            Some(TypeData::Class(class)) => out.push_str(&self.class_name(class)),
            Some(TypeData::Param(param)) => out.push_str(&self.param_name(param)),
            Some(TypeData::Application { origin, args }) => {
                out.push_str(&self.class_name(origin));
                self.write_subscript(out, &types.type_list(args));
            }
            Some(TypeData::Composite { kind, members }) => {
                let members = types.type_list(members);
                match kind {
                    CompositeKind::Union => {
                        out.push_str("Union");
                        self.write_subscript(out, &members);
                    }
                    CompositeKind::Optional => {
                        out.push_str("Optional");
                        self.write_subscript(out, &members);
                    }
                    CompositeKind::Tuple if members.is_empty() => out.push_str("Tuple[()]"),
                    CompositeKind::Tuple => {
                        out.push_str("Tuple");
                        self.write_subscript(out, &members);
                    }
                    CompositeKind::Callable => self.write_callable(out, &members),
                    CompositeKind::Container(name) => {
                        out.push_str(&types.resolve_atom_ref(name));
                        self.write_subscript(out, &members);
                    }
                }
            }
            None => {
                let _ = write!(out, "#{}", type_id.0);
            }
        }
    }

    fn write_subscript(&self, out: &mut String, members: &[TypeId]) {
        out.push('[');
        self.write_list(out, members);
        out.push(']');
    }

    fn write_list(&self, out: &mut String, members: &[TypeId]) {
        for (i, &member) in members.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, member);
        }
    }

    fn write_callable(&self, out: &mut String, members: &[TypeId]) {
        out.push_str("Callable[[");
        if let Some((&ret, params)) = members.split_last() {
            self.write_list(out, params);
            out.push_str("], ");
            self.write_type(out, ret);
        } else {
            out.push(']');
        }
        out.push(']');
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
