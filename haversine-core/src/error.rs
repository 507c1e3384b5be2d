//! Error type shared by the parser, the value accessors and the file codecs.

use crate::value::ValueKind;

/// Errors produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An accessor was used against a value of a different kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    /// Opening a container would exceed the configured depth limit.
    #[error("nesting depth {depth} exceeds the supported limit at byte {offset}")]
    UnsupportedNesting { depth: usize, offset: usize },

    /// A token looked numeric but does not follow `-?digits(.digits)?`.
    #[error("malformed numeric token {token:?} at byte {offset}")]
    MalformedToken { token: String, offset: usize },

    /// A coordinate pair object lacks one of its fields.
    #[error("pair {index} is missing field {field:?}")]
    MissingField { index: usize, field: &'static str },

    /// Answer file length is not a whole number of f64 values.
    #[error("answer data of {len} bytes is not a multiple of 8")]
    TruncatedAnswers { len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
