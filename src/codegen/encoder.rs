use crate::error::Result;
use crate::label::is_heterogeneous;
use crate::naming::type_alias_name;
use crate::traverse::{AliasShape, SumShape, Visitor};
use crate::value::{JsonValue, Node};

use super::{elm_string, encoder_name, Emitter};

/// Inline encoder expression (a function of one argument) for a node.
pub fn encoder_expr(node: &Node) -> String {
    match &node.value {
        JsonValue::Boolean(_) => "Json.Encode.bool".to_string(),
        JsonValue::Number(_) => "Json.Encode.float".to_string(),
        JsonValue::String(_) => "Json.Encode.string".to_string(),
        JsonValue::Null => "(\\_ -> Json.Encode.null)".to_string(),
        JsonValue::Object(_) => encoder_name(&type_alias_name(&node.path)),
        JsonValue::List(items) => match items.first() {
            None => "(\\_ -> Json.Encode.list identity [])".to_string(),
            Some(first) if !is_heterogeneous(items) => {
                format!("(Json.Encode.list {})", encoder_expr(first))
            }
            Some(_) => format!("(Json.Encode.list {})", encoder_name(&type_alias_name(&node.path))),
        },
    }
}

#[derive(Debug, Default)]
pub struct EncoderVisitor {
    definitions: Vec<String>,
}

impl Visitor for EncoderVisitor {
    fn visit_alias(&mut self, alias: &AliasShape<'_>) -> Result<()> {
        let encoder = encoder_name(&alias.name);
        let mut out = format!("{encoder} : {} -> Json.Encode.Value\n", alias.name);
        if alias.fields.is_empty() {
            out.push_str(&format!("{encoder} _ =\n    Json.Encode.object []"));
        } else {
            out.push_str(&format!("{encoder} record =\n    Json.Encode.object"));
            for (i, field) in alias.fields.iter().enumerate() {
                let lead = if i == 0 { '[' } else { ',' };
                out.push_str(&format!(
                    "\n        {lead} ( {}, {} record.{} )",
                    elm_string(field.key),
                    encoder_expr(field.node),
                    field.identifier
                ));
            }
            out.push_str("\n        ]");
        }
        tracing::debug!(name = %alias.name, "record encoder");
        self.definitions.push(out);
        Ok(())
    }

    // Branch order does not affect correctness here; it mirrors the declaration.
    fn visit_sum(&mut self, sum: &SumShape<'_>) -> Result<()> {
        let encoder = encoder_name(&sum.name);
        let mut out = format!("{encoder} : {} -> Json.Encode.Value\n", sum.name);
        out.push_str(&format!("{encoder} value =\n    case value of"));
        for (i, variant) in sum.variants.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!(
                "\n        {} payload ->\n            {} payload",
                variant.constructor,
                encoder_expr(variant.exemplar)
            ));
        }
        tracing::debug!(name = %sum.name, branches = sum.variants.len(), "sum encoder");
        self.definitions.push(out);
        Ok(())
    }
}

impl Emitter for EncoderVisitor {
    fn finish(self) -> Vec<String> {
        self.definitions
    }
}
