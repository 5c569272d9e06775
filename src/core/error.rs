// ============================================================================
// url-filters - Errors
// ============================================================================

use thiserror::Error;

/// Failure to turn serialized text back into a filters collection.
///
/// These never leave [`deserialize_filters`](crate::sync::deserialize_filters):
/// they are reported to the error hook and the collection falls back to empty.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Flatted payload must be a JSON array")]
    NotAnArray,

    #[error("Flatted payload is empty")]
    EmptyPayload,

    #[error("Invalid reference {0:?}")]
    InvalidReference(String),

    #[error("Reference {0} points past the end of the payload")]
    DanglingReference(usize),

    #[error("Circular reference to entry {0}")]
    CircularReference(usize),

    #[error("Payload expands past {0} values")]
    TooManyNodes(usize),

    #[error("Payload nests deeper than {0} levels")]
    TooDeep(usize),

    #[error("Unexpected shape: {0}")]
    UnexpectedShape(String),
}

/// Errors surfaced to callers of the filter operations.
#[derive(Error, Debug)]
pub enum FiltersError {
    /// A mutating operation had no commit function to persist its result.
    #[error(
        "No commit function was found for `{operation}`. Configure a default commit on the \
         provider or pass one with the operation"
    )]
    MissingCommit { operation: &'static str },

    /// A stored value does not fit the type requested by a typed peek.
    #[error("Filter `{name}` holds a value of an unexpected type: {source}")]
    ValueType {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
