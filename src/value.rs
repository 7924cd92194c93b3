//! Value model: a JSON tree where every node carries its naming path.
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    String(String),
    Number(OrderedFloat<f64>),
    Boolean(bool),
    Null,
    List(Vec<Node>),
    /// Members in document order; keys are unique per level.
    Object(IndexMap<String, Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: JsonValue,
    pub path: Path,
}

impl Node {
    /// Build the annotated tree in one top-down pass, starting at `path`.
    pub fn annotate(path: Path, value: Value) -> Node {
        let value = match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Boolean(b),
            Value::Number(n) => JsonValue::Number(OrderedFloat(n.as_f64().unwrap_or_default())),
            Value::String(s) => JsonValue::String(s),
            Value::Array(xs) => JsonValue::List(
                xs.into_iter()
                    .enumerate()
                    .map(|(i, x)| Node::annotate(path.position(i), x))
                    .collect(),
            ),
            Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| {
                        let child = Node::annotate(path.field(&k), v);
                        (k, child)
                    })
                    .collect(),
            ),
        };
        Node { value, path }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.value, JsonValue::List(_) | JsonValue::Object(_))
    }
}

/// Parse one JSON document, reporting the JSON path of the failure.
pub fn parse(src: &str) -> Result<Value> {
    let de = &mut serde_json::Deserializer::from_str(src);
    let value: Value = match serde_path_to_error::deserialize(&mut *de) {
        Ok(v) => v,
        Err(err) => {
            let path = err.path().to_string();
            return Err(Error::parse(path, err.into_inner()));
        }
    };
    // reject trailing garbage the way `serde_json::from_str` does
    de.end().map_err(|err| Error::parse(".", err))?;
    Ok(value)
}
