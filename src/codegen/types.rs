use crate::error::Result;
use crate::traverse::{AliasShape, SumShape, Visitor};

use super::Emitter;

#[derive(Debug, Default)]
pub struct TypeVisitor {
    declarations: Vec<String>,
}

impl Visitor for TypeVisitor {
    fn visit_alias(&mut self, alias: &AliasShape<'_>) -> Result<()> {
        let mut out = format!("type alias {} =\n", alias.name);
        if alias.fields.is_empty() {
            out.push_str("    {}");
        } else {
            for (i, field) in alias.fields.iter().enumerate() {
                let lead = if i == 0 { '{' } else { ',' };
                out.push_str(&format!("    {lead} {} : {}\n", field.identifier, field.label));
            }
            out.push_str("    }");
        }
        tracing::debug!(name = %alias.name, fields = alias.fields.len(), "type alias");
        self.declarations.push(out);
        Ok(())
    }

    fn visit_sum(&mut self, sum: &SumShape<'_>) -> Result<()> {
        let mut out = format!("type {}", sum.name);
        for (i, variant) in sum.variants.iter().enumerate() {
            let lead = if i == 0 { '=' } else { '|' };
            out.push_str(&format!("\n    {lead} {} {}", variant.constructor, variant.label.atom()));
        }
        tracing::debug!(name = %sum.name, variants = sum.variants.len(), "sum type");
        self.declarations.push(out);
        Ok(())
    }
}

impl Emitter for TypeVisitor {
    fn finish(self) -> Vec<String> {
        self.declarations
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::types_and_aliases;
    use crate::path::Path;
    use crate::value::Node;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn types(v: Value) -> Vec<String> {
        types_and_aliases(&Node::annotate(Path::root("Root"), v)).unwrap()
    }

    #[test]
    fn record_alias() {
        assert_eq!(
            types(json!({"b": [1, 2, 3], "a": 1})),
            vec!["type alias Root =\n    { a : Float\n    , b : List Float\n    }"]
        );
    }

    #[test]
    fn empty_record_alias() {
        assert_eq!(types(json!({})), vec!["type alias Root =\n    {}"]);
    }

    #[test]
    fn sum_type_variants() {
        assert_eq!(
            types(json!([1, "x", true])),
            vec!["type Root\n    = Root0 Bool\n    | Root1 Float\n    | Root2 String"]
        );
    }

    #[test]
    fn compound_payloads_are_parenthesised() {
        assert_eq!(
            types(json!([[1], null, []])),
            vec!["type Root\n    = Root0 ()\n    | Root1 (List Float)\n    | Root2 (List ())"]
        );
    }

    #[test]
    fn nested_records_follow_parent() {
        assert_eq!(
            types(json!({"user": {"name": "x", "tags": ["a"]}, "type": null})),
            vec![
                "type alias Root =\n    { type_ : ()\n    , user : User\n    }",
                "type alias User =\n    { name : String\n    , tags : List String\n    }",
            ]
        );
    }
}
