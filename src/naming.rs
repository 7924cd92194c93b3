//! Identifier derivation and the naming-conflict pass.
//!
//! Type names come from paths, record field names from JSON keys. Both are
//! split into words first so that `user_id`, `user-id` and `userId` all map
//! onto the same Elm spelling.
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::codegen::{needs_document_codec, DOCUMENT_NAME};
use crate::error::{Error, Result};
use crate::path::Path;
use crate::traverse::{walk, AliasShape, SumShape, Visitor};
use crate::value::Node;

static UPPER_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").expect("static identifier pattern"));

/// Words Elm will not accept as record field names.
const RESERVED_WORDS: &[&str] = &[
    "if", "then", "else", "case", "of", "let", "in", "type", "module", "where",
    "import", "exposing", "as", "port", "alias", "infix",
];

/// Types and constructors every Elm module imports implicitly.
const IMPLICIT_NAMES: &[&str] = &[
    "Int", "Float", "Bool", "True", "False", "Char", "String", "List", "Maybe",
    "Just", "Nothing", "Result", "Ok", "Err", "Order", "LT", "EQ", "GT", "Never",
    "Cmd", "Sub", "Program",
];

/// Prefix for type names that would otherwise start with a digit.
const NUMERIC_PREFIX: &str = "Item";

// ---------------------------------- Words --------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub words: Vec<String>,
}

impl Name {
    /// Split on anything that is not an ASCII letter or digit, and on
    /// lower→upper boundaries (`userId` → `user`, `Id`).
    pub fn from(text: &str) -> Self {
        let mut words = Vec::new();
        let mut current = String::new();
        let mut prev_lower = false;

        for c in text.chars() {
            if !c.is_ascii_alphanumeric() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                prev_lower = false;
                continue;
            }
            if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
        Name { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn to_title_case(&self) -> String {
        self.words.iter().map(|w| capitalize(w)).collect()
    }

    pub fn to_camel_case(&self) -> String {
        let mut out = String::new();
        for (i, word) in self.words.iter().enumerate() {
            if i == 0 {
                out.push_str(&word.to_ascii_lowercase());
            } else {
                out.push_str(&capitalize(word));
            }
        }
        out
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

// ------------------------------ Derivations ------------------------------- //

/// Type name for the node at `path`.
///
/// The root alone names itself; below the root the root label is dropped and
/// the remaining segments are title-cased and joined. Names that would start
/// with a digit (or be empty) get an `Item` prefix.
pub fn type_alias_name(path: &Path) -> String {
    if path.is_root() {
        return Name::from(path.root_label()).to_title_case();
    }
    let mut name = String::new();
    for segment in path.segments() {
        name.push_str(&Name::from(&segment.label()).to_title_case());
    }
    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => name,
        _ => format!("{NUMERIC_PREFIX}{name}"),
    }
}

/// Elm record field name for a JSON key.
pub fn field_identifier(key: &str) -> String {
    let name = Name::from(key);
    if name.is_empty() {
        return "field".to_string();
    }
    let mut ident = name.to_camel_case();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert_str(0, "field");
    }
    if RESERVED_WORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

// -------------------------------- Conflicts ------------------------------- //

/// Fail fast if two declarations would share a name, or a record would have
/// two fields with one identifier. A non-record root also takes `Document`
/// for its `decodeDocument`/`encodeDocument` pair.
pub fn check_names(root: &Node) -> Result<()> {
    let mut collector = NameCollector::default();
    if needs_document_codec(root) {
        collector.declared.insert(DOCUMENT_NAME.to_string(), "the document codec".to_string());
    }
    walk(&mut collector, root)?;
    tracing::debug!(declared = collector.declared.len(), "names are unique");
    Ok(())
}

#[derive(Default)]
struct NameCollector {
    declared: HashMap<String, String>,
}

impl NameCollector {
    fn declare(&mut self, name: &str, path: &Path) -> Result<()> {
        if !UPPER_IDENTIFIER.is_match(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                path: path.to_string(),
            });
        }
        if IMPLICIT_NAMES.contains(&name) {
            return Err(Error::NamingConflict {
                name: name.to_string(),
                first: "the Elm prelude".to_string(),
                second: path.to_string(),
            });
        }
        match self.declared.entry(name.to_string()) {
            Entry::Occupied(first) => Err(Error::NamingConflict {
                name: name.to_string(),
                first: first.get().clone(),
                second: path.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(path.to_string());
                Ok(())
            }
        }
    }
}

impl Visitor for NameCollector {
    fn visit_alias(&mut self, alias: &AliasShape<'_>) -> Result<()> {
        self.declare(&alias.name, alias.path)?;
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for field in &alias.fields {
            if let Some(first) = seen.insert(&field.identifier, field.key) {
                return Err(Error::FieldConflict {
                    alias: alias.name.clone(),
                    identifier: field.identifier.clone(),
                    first: first.to_string(),
                    second: field.key.to_string(),
                });
            }
        }
        Ok(())
    }

    fn visit_sum(&mut self, sum: &SumShape<'_>) -> Result<()> {
        self.declare(&sum.name, sum.path)?;
        for variant in &sum.variants {
            self.declare(&variant.constructor, sum.path)?;
        }
        Ok(())
    }
}
