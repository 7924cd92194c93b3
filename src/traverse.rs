//! The one traversal every generator shares.
//!
//! `walk` owns recursion order and the nested-declaration predicate; visitors
//! only see declaration shapes (one per alias, one per sum type) and decide
//! what text to produce. Because ordering lives here, the type, decoder and
//! encoder passes cannot drift apart.
use crate::error::Result;
use crate::label::{is_heterogeneous, produces_nested_declaration, representatives, type_label, TypeLabel};
use crate::naming::{field_identifier, type_alias_name};
use crate::path::Path;
use crate::value::{JsonValue, Node};

/// One record field of an alias, in sorted key order.
#[derive(Debug)]
pub struct FieldShape<'a> {
    pub key: &'a str,
    pub identifier: String,
    pub label: TypeLabel,
    pub node: &'a Node,
}

/// Product type declared for an object node.
#[derive(Debug)]
pub struct AliasShape<'a> {
    pub name: String,
    pub path: &'a Path,
    pub fields: Vec<FieldShape<'a>>,
}

/// One variant of a sum type; `exemplar` is the first list member carrying
/// this variant's label.
#[derive(Debug)]
pub struct VariantShape<'a> {
    pub constructor: String,
    pub label: TypeLabel,
    pub exemplar: &'a Node,
}

/// Sum type declared for a heterogeneous list node.
#[derive(Debug)]
pub struct SumShape<'a> {
    pub name: String,
    pub path: &'a Path,
    pub variants: Vec<VariantShape<'a>>,
}

impl<'a> AliasShape<'a> {
    fn new(node: &'a Node, members: &'a indexmap::IndexMap<String, Node>) -> Self {
        let mut fields: Vec<FieldShape<'a>> = members
            .iter()
            .map(|(key, child)| FieldShape {
                key: key.as_str(),
                identifier: field_identifier(key),
                label: type_label(child),
                node: child,
            })
            .collect();
        fields.sort_by(|a, b| a.key.cmp(b.key));
        Self { name: type_alias_name(&node.path), path: &node.path, fields }
    }
}

impl<'a> SumShape<'a> {
    fn new(node: &'a Node, items: &'a [Node]) -> Self {
        let name = type_alias_name(&node.path);
        let variants = representatives(items)
            .into_iter()
            .enumerate()
            .map(|(i, (label, exemplar))| VariantShape {
                constructor: format!("{name}{i}"),
                label,
                exemplar,
            })
            .collect();
        Self { name, path: &node.path, variants }
    }
}

pub trait Visitor {
    fn visit_alias(&mut self, alias: &AliasShape<'_>) -> Result<()>;
    fn visit_sum(&mut self, sum: &SumShape<'_>) -> Result<()>;
}

/// Depth-first, parent before children. Object members are descended in the
/// same sorted order as the alias fields, not in document order, so the whole
/// declaration sequence is independent of member order. List members go in
/// document order.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) -> Result<()> {
    match &node.value {
        JsonValue::Object(members) => {
            let alias = AliasShape::new(node, members);
            visitor.visit_alias(&alias)?;
            for field in &alias.fields {
                if produces_nested_declaration(field.node) {
                    walk(visitor, field.node)?;
                }
            }
        }
        JsonValue::List(items) if is_heterogeneous(items) => {
            visitor.visit_sum(&SumShape::new(node, items))?;
            for item in items.iter().filter(|item| produces_nested_declaration(item)) {
                walk(visitor, item)?;
            }
        }
        JsonValue::List(items) => {
            // uniform: every member shares one label, so one stands for all
            if let Some(first) = items.first() {
                if produces_nested_declaration(first) {
                    walk(visitor, first)?;
                }
            }
        }
        JsonValue::String(_) | JsonValue::Number(_) | JsonValue::Boolean(_) | JsonValue::Null => {}
    }
    Ok(())
}
