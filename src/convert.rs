//! Front API: JSON text in, three Elm artifact lists out.
use serde::Serialize;
use serde_json::Value;

use crate::codegen::{self, decoder_expr, document_codec, encoder_expr, DocumentCodec};
use crate::error::Result;
use crate::label::type_label;
use crate::naming::check_names;
use crate::path::{Path, DEFAULT_ROOT};
use crate::value::{self, Node};

#[derive(Debug, Clone)]
pub struct Options {
    /// Label of the root path; the root declaration is named after it.
    pub root_name: String,
    /// Run the three generators on the rayon pool.
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { root_name: DEFAULT_ROOT.to_string(), parallel: false }
    }
}

/// How to read and write the document root, declared or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootEntry {
    pub label: String,
    pub decoder: String,
    pub encoder: String,
    /// Present when the root is not a record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentCodec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifacts {
    pub types: Vec<String>,
    pub decoders: Vec<String>,
    pub encoders: Vec<String>,
    pub root: RootEntry,
}

impl Artifacts {
    /// A complete Elm module exposing everything generated. The document codec,
    /// if any, follows the decoders and encoders respectively.
    pub fn render_module(&self, module_name: &str) -> String {
        let mut out = format!("module {module_name} exposing (..)\n\nimport Json.Decode\nimport Json.Encode\n");
        let document = self.root.document.as_ref();
        let fragments = self
            .types
            .iter()
            .chain(&self.decoders)
            .chain(document.map(|codec| &codec.decoder))
            .chain(&self.encoders)
            .chain(document.map(|codec| &codec.encoder));
        for fragment in fragments {
            out.push_str("\n\n");
            out.push_str(fragment);
            out.push('\n');
        }
        out
    }
}

pub fn convert(json_text: &str) -> Result<Artifacts> {
    convert_with(json_text, &Options::default())
}

pub fn convert_with(json_text: &str, options: &Options) -> Result<Artifacts> {
    let value = value::parse(json_text)?;
    convert_value(value, options)
}

/// Same as `convert_with` for an already parsed document.
pub fn convert_value(value: Value, options: &Options) -> Result<Artifacts> {
    let _span = tracing::info_span!("convert", root = %options.root_name).entered();

    let root = Node::annotate(Path::root(options.root_name.as_str()), value);
    check_names(&root)?;

    let (types, (decoders, encoders)) = if options.parallel {
        rayon::join(
            || codegen::types_and_aliases(&root),
            || rayon::join(|| codegen::decoders(&root), || codegen::encoders(&root)),
        )
    } else {
        (
            codegen::types_and_aliases(&root),
            (codegen::decoders(&root), codegen::encoders(&root)),
        )
    };
    let (types, decoders, encoders) = (types?, decoders?, encoders?);
    debug_assert!(types.len() == decoders.len() && decoders.len() == encoders.len());
    tracing::info!(declarations = types.len(), "generated");

    let root = RootEntry {
        label: type_label(&root).to_string(),
        decoder: decoder_expr(&root),
        encoder: encoder_expr(&root),
        document: document_codec(&root),
    };
    Ok(Artifacts { types, decoders, encoders, root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn malformed_input_yields_no_artifacts() {
        let err = convert("{\"a\": ").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn parallel_matches_sequential() {
        let doc = r#"{"a": [1, "x", {"b": [[], [true]]}], "c": {"d": null}}"#;
        let seq = convert(doc).unwrap();
        let par = convert_with(doc, &Options { parallel: true, ..Options::default() }).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn root_name_is_configurable() {
        let out = convert_with("{\"x\": 1}", &Options { root_name: "payload".into(), parallel: false }).unwrap();
        assert_eq!(out.types, vec!["type alias Payload =\n    { x : Float\n    }"]);
        assert_eq!(out.root.decoder, "decodePayload");
    }

    #[test]
    fn module_rendering() {
        let out = convert("{\"a\": true}").unwrap();
        let module = out.render_module("Data");
        assert_eq!(
            module,
            concat!(
                "module Data exposing (..)\n",
                "\n",
                "import Json.Decode\n",
                "import Json.Encode\n",
                "\n\n",
                "type alias Root =\n    { a : Bool\n    }\n",
                "\n\n",
                "decodeRoot : Json.Decode.Decoder Root\ndecodeRoot =\n    Json.Decode.map Root\n        (Json.Decode.field \"a\" Json.Decode.bool)\n",
                "\n\n",
                "encodeRoot : Root -> Json.Encode.Value\nencodeRoot record =\n    Json.Encode.object\n        [ ( \"a\", Json.Encode.bool record.a )\n        ]\n",
            )
        );
    }

    #[test]
    fn empty_list_module_still_decodes_the_document() {
        let out = convert("[]").unwrap();
        assert_eq!(
            out.render_module("Data"),
            concat!(
                "module Data exposing (..)\n",
                "\n",
                "import Json.Decode\n",
                "import Json.Encode\n",
                "\n\n",
                "decodeDocument : Json.Decode.Decoder (List ())\ndecodeDocument =\n    (Json.Decode.list (Json.Decode.succeed ()))\n",
                "\n\n",
                "encodeDocument : List () -> Json.Encode.Value\nencodeDocument =\n    (\\_ -> Json.Encode.list identity [])\n",
            )
        );
    }

    #[test]
    fn sum_root_module_decodes_the_list_not_one_member() {
        let out = convert(r#"[1, "x", true]"#).unwrap();
        let module = out.render_module("Data");
        assert!(module.contains(&out.root.decoder));
        assert!(module.contains(&out.root.encoder));
        let decode_root = module.find("decodeRoot : ").unwrap();
        let decode_document = module.find("decodeDocument : Json.Decode.Decoder (List Root)\n").unwrap();
        let encode_root = module.find("encodeRoot : ").unwrap();
        let encode_document = module.find("encodeDocument : List Root -> Json.Encode.Value\n").unwrap();
        assert!(decode_root < decode_document);
        assert!(decode_document < encode_root);
        assert!(encode_root < encode_document);
        assert!(module.ends_with("encodeDocument =\n    (Json.Encode.list encodeRoot)\n"));
    }

    #[test]
    fn list_of_records_module_has_a_list_entry_point() {
        let out = convert(r#"[{"a": 1}]"#).unwrap();
        let module = out.render_module("Data");
        assert!(module.contains("decodeDocument =\n    (Json.Decode.list decodeObject)\n"));
        assert!(module.contains("encodeDocument =\n    (Json.Encode.list encodeObject)\n"));
    }

    #[test]
    fn record_roots_render_no_document_codec() {
        let out = convert("{\"a\": true}").unwrap();
        assert_eq!(out.root.document, None);
        assert!(!out.render_module("Data").contains("Document"));
    }

    #[test]
    fn document_name_is_reserved_for_list_roots() {
        let options = Options { root_name: "document".into(), parallel: false };
        let err = convert_with(r#"[1, "x"]"#, &options).unwrap_err();
        assert!(matches!(err, Error::NamingConflict { ref name, .. } if name == "Document"));
        // a record root needs no document codec, so the name stays free
        convert_with("{\"x\": 1}", &options).unwrap();
    }

    #[test]
    fn conflicts_abort_generation() {
        let err = convert(r#"{"a b": {}, "a": {"b": {}}}"#).unwrap_err();
        assert!(matches!(err, Error::NamingConflict { .. }));
    }
}
