//! Error types for JSON → Elm conversion.
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a conversion. Generation itself is pure, so the
/// only failures are bad input text and identifiers that would not compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input text is not a single well-formed JSON document
    #[error("invalid JSON at {path}: {message}")]
    Parse { path: String, message: String },

    /// Two declarations (or a declaration and an Elm builtin) share a name
    #[error("naming conflict: `{name}` is declared by both {first} and {second}")]
    NamingConflict {
        name: String,
        first: String,
        second: String,
    },

    /// Two keys of one object map to the same record field identifier
    #[error("field conflict in `{alias}`: keys {first:?} and {second:?} both become `{identifier}`")]
    FieldConflict {
        alias: String,
        identifier: String,
        first: String,
        second: String,
    },

    /// A derived type or constructor name is not a valid Elm upper identifier
    #[error("`{name}` (derived from {path}) is not a valid Elm type name")]
    InvalidIdentifier { name: String, path: String },
}

impl Error {
    pub(crate) fn parse(path: impl Into<String>, message: impl ToString) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
