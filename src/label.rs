//! Type labels and the homogeneity analysis over list members.
//!
//! A `TypeLabel` is never stored on a node; it is recomputed from structure
//! wherever it is needed, so the type, decoder and encoder passes always agree
//! on it byte-for-byte.
use std::cmp::Ordering;
use std::fmt;

use crate::naming::type_alias_name;
use crate::path::Path;
use crate::value::{JsonValue, Node};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeLabel {
    Bool,
    Float,
    String,
    Unit,
    /// Generated alias or sum type
    Named(String),
    List(Box<TypeLabel>),
}

impl TypeLabel {
    pub fn list_of(item: TypeLabel) -> Self {
        TypeLabel::List(Box::new(item))
    }

    /// `List ()`, the label of a list with no element information.
    pub fn is_empty_sequence(&self) -> bool {
        matches!(self, TypeLabel::List(item) if **item == TypeLabel::Unit)
    }

    /// Rendering usable in argument position (parenthesised when compound).
    pub fn atom(&self) -> String {
        match self {
            TypeLabel::List(_) => format!("({self})"),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeLabel::Bool => f.write_str("Bool"),
            TypeLabel::Float => f.write_str("Float"),
            TypeLabel::String => f.write_str("String"),
            TypeLabel::Unit => f.write_str("()"),
            TypeLabel::Named(name) => f.write_str(name),
            TypeLabel::List(item) => write!(f, "List {}", item.atom()),
        }
    }
}

/// Order of sum type variants and of decoder alternatives.
///
/// Alphabetical by rendered label, except that the empty-sequence label always
/// sorts last: its decoder accepts any list and would shadow every more
/// specific list alternative tried after it. Only that exact label moves:
/// a nested one such as `List (List ())` still sorts alphabetically, ahead of
/// `List (List Float)`, and so shadows it when decoding.
pub fn variant_order(a: &TypeLabel, b: &TypeLabel) -> Ordering {
    a.is_empty_sequence()
        .cmp(&b.is_empty_sequence())
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

/// Label of a single node.
pub fn type_label(node: &Node) -> TypeLabel {
    match &node.value {
        JsonValue::Boolean(_) => TypeLabel::Bool,
        JsonValue::Number(_) => TypeLabel::Float,
        JsonValue::String(_) => TypeLabel::String,
        JsonValue::Null => TypeLabel::Unit,
        JsonValue::Object(_) => TypeLabel::Named(type_alias_name(&node.path)),
        JsonValue::List(items) => TypeLabel::list_of(list_type_label(&node.path, items)),
    }
}

/// Distinct labels among `nodes`, deduplicated and sorted by `variant_order`.
pub fn element_type_labels(nodes: &[Node]) -> Vec<TypeLabel> {
    let mut labels: Vec<TypeLabel> = nodes.iter().map(type_label).collect();
    labels.sort_by(variant_order);
    labels.dedup();
    labels
}

pub fn is_heterogeneous(nodes: &[Node]) -> bool {
    element_type_labels(nodes).len() > 1
}

/// Element label of a list at `path`: unit when empty, the shared label when
/// uniform, otherwise the sum type named after the list.
pub fn list_type_label(path: &Path, nodes: &[Node]) -> TypeLabel {
    let mut labels = element_type_labels(nodes);
    match labels.len() {
        0 => TypeLabel::Unit,
        1 => labels.remove(0),
        _ => TypeLabel::Named(type_alias_name(path)),
    }
}

/// Whether `node` (or something below it) needs a named declaration.
pub fn produces_nested_declaration(node: &Node) -> bool {
    match &node.value {
        JsonValue::Object(_) => true,
        JsonValue::List(items) => items.iter().any(Node::is_composite) || is_heterogeneous(items),
        _ => false,
    }
}

/// One representative node per distinct label, in variant order.
pub fn representatives(nodes: &[Node]) -> Vec<(TypeLabel, &Node)> {
    let mut seen: Vec<(TypeLabel, &Node)> = Vec::new();
    for node in nodes {
        let label = type_label(node);
        if !seen.iter().any(|(l, _)| *l == label) {
            seen.push((label, node));
        }
    }
    seen.sort_by(|(a, _), (b, _)| variant_order(a, b));
    seen
}
