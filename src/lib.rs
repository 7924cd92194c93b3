//! Infer an Elm model from one JSON document.
//!
//! Pipeline: parse → annotate every node with a naming path → walk the tree
//! once per artifact (type declarations, decoders, encoders). All three
//! passes share one traversal and one labelling function, so the emitted
//! module is internally consistent by construction.
pub mod codegen;
pub mod convert;
pub mod error;
pub mod label;
pub mod naming;
pub mod path;
pub mod traverse;
pub mod value;

pub use codegen::DocumentCodec;
pub use convert::{convert, convert_value, convert_with, Artifacts, Options, RootEntry};
pub use error::{Error, Result};
