use thiserror::Error;

/// Errors that can arise while driving the Ion Hash normalization engine.
///
/// Per the error handling design: once any of these occurs, the
/// [`crate::driver::HashDriver`] that produced it is considered poisoned and
/// should be discarded rather than reused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IonHashError {
    #[error("step_out() called at depth 0")]
    StackUnderflow,

    #[error("digest() called with {open_containers} unfinished container(s)")]
    PrematureDigest { open_containers: usize },

    #[error("malformed scalar encoding: unterminated VarUInt while computing length-of-length")]
    MalformedScalarEncoding,

    #[error("container nesting exceeded the configured maximum depth of {max_depth}")]
    DepthLimitExceeded { max_depth: usize },
}

pub type IonHashResult<T> = Result<T, IonHashError>;
