use crate::error::Result;
use crate::label::is_heterogeneous;
use crate::naming::type_alias_name;
use crate::traverse::{AliasShape, SumShape, Visitor};
use crate::value::{JsonValue, Node};

use super::{decoder_name, elm_string, Emitter};

/// `Json.Decode.map8` is the widest combinator elm/json ships.
const MAX_MAP_ARITY: usize = 8;

/// Inline decoder expression for a node.
pub fn decoder_expr(node: &Node) -> String {
    match &node.value {
        JsonValue::Boolean(_) => "Json.Decode.bool".to_string(),
        JsonValue::Number(_) => "Json.Decode.float".to_string(),
        JsonValue::String(_) => "Json.Decode.string".to_string(),
        JsonValue::Null => "(Json.Decode.null ())".to_string(),
        JsonValue::Object(_) => decoder_name(&type_alias_name(&node.path)),
        JsonValue::List(items) => {
            let element = match items.first() {
                // nothing to learn the element type from
                None => "(Json.Decode.succeed ())".to_string(),
                Some(first) if !is_heterogeneous(items) => decoder_expr(first),
                Some(_) => decoder_name(&type_alias_name(&node.path)),
            };
            format!("(Json.Decode.list {element})")
        }
    }
}

#[derive(Debug, Default)]
pub struct DecoderVisitor {
    definitions: Vec<String>,
}

impl DecoderVisitor {
    fn signature(name: &str) -> String {
        let decoder = decoder_name(name);
        format!("{decoder} : Json.Decode.Decoder {name}\n{decoder} =\n")
    }
}

impl Visitor for DecoderVisitor {
    fn visit_alias(&mut self, alias: &AliasShape<'_>) -> Result<()> {
        let mut out = Self::signature(&alias.name);
        let fields: Vec<String> = alias
            .fields
            .iter()
            .map(|f| format!("(Json.Decode.field {} {})", elm_string(f.key), decoder_expr(f.node)))
            .collect();

        match fields.len() {
            0 => out.push_str("    Json.Decode.succeed {}"),
            n if n <= MAX_MAP_ARITY => {
                let map = if n == 1 { "map".to_string() } else { format!("map{n}") };
                out.push_str(&format!("    Json.Decode.{map} {}", alias.name));
                for field in &fields {
                    out.push_str(&format!("\n        {field}"));
                }
            }
            _ => {
                // wider records: apply the constructor one field at a time
                out.push_str(&format!("    Json.Decode.succeed {}", alias.name));
                for field in &fields {
                    out.push_str(&format!("\n        |> Json.Decode.map2 (|>) {field}"));
                }
            }
        }
        tracing::debug!(name = %alias.name, "record decoder");
        self.definitions.push(out);
        Ok(())
    }

    fn visit_sum(&mut self, sum: &SumShape<'_>) -> Result<()> {
        let mut out = Self::signature(&sum.name);
        out.push_str("    Json.Decode.oneOf");
        for (i, variant) in sum.variants.iter().enumerate() {
            let lead = if i == 0 { '[' } else { ',' };
            out.push_str(&format!(
                "\n        {lead} Json.Decode.map {} {}",
                variant.constructor,
                decoder_expr(variant.exemplar)
            ));
        }
        out.push_str("\n        ]");
        tracing::debug!(name = %sum.name, alternatives = sum.variants.len(), "sum decoder");
        self.definitions.push(out);
        Ok(())
    }
}

impl Emitter for DecoderVisitor {
    fn finish(self) -> Vec<String> {
        self.definitions
    }
}
