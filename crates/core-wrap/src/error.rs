use thiserror::Error;

/// Failure raised by a wrapper operation. Propagates to the command caller and
/// aborts the remaining cursors.
#[derive(Error, Debug)]
pub enum WrapError {
    #[error("cursor {offset} is outside the document (size {size})")]
    OutOfBounds { offset: usize, size: usize },

    #[error("invalid log pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A named action that is not part of the closed action set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown console action `{0}`")]
pub struct ActionParseError(pub String);
