//! Elm code generation: type declarations, decoders, encoders.
//!
//! Each generator is a `Visitor` over the shared `traverse::walk`, so the three
//! artifact lists always line up one-to-one, declaration by declaration.
pub mod decoder;
pub mod encoder;
pub mod types;

use serde::Serialize;

use crate::error::Result;
use crate::label::type_label;
use crate::traverse::{walk, Visitor};
use crate::value::{JsonValue, Node};

pub use decoder::{decoder_expr, DecoderVisitor};
pub use encoder::{encoder_expr, EncoderVisitor};
pub use types::TypeVisitor;

/// A visitor that accumulates one text fragment per declaration.
pub trait Emitter: Visitor + Default {
    fn finish(self) -> Vec<String>;
}

fn emit<E: Emitter>(root: &Node) -> Result<Vec<String>> {
    let mut emitter = E::default();
    walk(&mut emitter, root)?;
    Ok(emitter.finish())
}

/// `type alias` and `type` declarations, parents before children.
pub fn types_and_aliases(root: &Node) -> Result<Vec<String>> {
    emit::<TypeVisitor>(root)
}

/// One `decode<Name>` definition per declaration, in declaration order.
pub fn decoders(root: &Node) -> Result<Vec<String>> {
    emit::<DecoderVisitor>(root)
}

/// One `encode<Name>` definition per declaration, in declaration order.
pub fn encoders(root: &Node) -> Result<Vec<String>> {
    emit::<EncoderVisitor>(root)
}

/// Type name taken by the whole-document codec of a non-record root.
pub const DOCUMENT_NAME: &str = "Document";

/// `decodeDocument` and `encodeDocument` definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentCodec {
    pub decoder: String,
    pub encoder: String,
}

/// A record root is read by its own `decode<Root>`. Lists and scalars have no
/// such entry point (a sum root decodes one member, not the list).
pub fn needs_document_codec(root: &Node) -> bool {
    !matches!(root.value, JsonValue::Object(_))
}

/// Entry points for the whole document, wrapping the inline root expressions.
pub fn document_codec(root: &Node) -> Option<DocumentCodec> {
    if !needs_document_codec(root) {
        return None;
    }
    let label = type_label(root);
    let decoder = decoder_name(DOCUMENT_NAME);
    let encoder = encoder_name(DOCUMENT_NAME);
    Some(DocumentCodec {
        decoder: format!(
            "{decoder} : Json.Decode.Decoder {}\n{decoder} =\n    {}",
            label.atom(),
            decoder_expr(root),
        ),
        encoder: format!(
            "{encoder} : {label} -> Json.Encode.Value\n{encoder} =\n    {}",
            encoder_expr(root),
        ),
    })
}

pub(crate) fn decoder_name(type_name: &str) -> String {
    format!("decode{type_name}")
}

pub(crate) fn encoder_name(type_name: &str) -> String {
    format!("encode{type_name}")
}

/// Elm string literal for `text`.
pub fn elm_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:04X}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn document(v: Value) -> Option<DocumentCodec> {
        document_codec(&Node::annotate(Path::root("Root"), v))
    }

    #[test]
    fn record_roots_are_their_own_entry_point() {
        assert_eq!(document(json!({"a": 1})), None);
        assert_eq!(document(json!({})), None);
    }

    #[test]
    fn empty_list_root_gets_a_document_codec() {
        let codec = document(json!([])).unwrap();
        assert_eq!(
            codec.decoder,
            "decodeDocument : Json.Decode.Decoder (List ())\ndecodeDocument =\n    (Json.Decode.list (Json.Decode.succeed ()))"
        );
        assert_eq!(
            codec.encoder,
            "encodeDocument : List () -> Json.Encode.Value\nencodeDocument =\n    (\\_ -> Json.Encode.list identity [])"
        );
    }

    #[test]
    fn sum_root_document_codec_covers_the_whole_list() {
        let codec = document(json!([1, "x", true])).unwrap();
        assert!(codec.decoder.starts_with("decodeDocument : Json.Decode.Decoder (List Root)\n"));
        assert!(codec.decoder.ends_with("    (Json.Decode.list decodeRoot)"));
        assert!(codec.encoder.starts_with("encodeDocument : List Root -> Json.Encode.Value\n"));
        assert!(codec.encoder.ends_with("    (Json.Encode.list encodeRoot)"));
    }

    #[test]
    fn scalar_root_document_codec() {
        let codec = document(json!("x")).unwrap();
        assert_eq!(codec.decoder, "decodeDocument : Json.Decode.Decoder String\ndecodeDocument =\n    Json.Decode.string");
    }

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(elm_string("plain"), "\"plain\"");
        assert_eq!(elm_string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(elm_string("a\\b"), "\"a\\\\b\"");
        assert_eq!(elm_string("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(elm_string("\u{1}"), "\"\\u{0001}\"");
    }
}
