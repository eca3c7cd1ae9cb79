//! Error types for production, interpretation and indexing.

use thiserror::Error;

/// Errors produced by the L-System engine and its consumers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LSystemError {
    /// An argument was outside the range the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A rule predecessor was whitespace or a control character.
    #[error("invalid symbol {0:?}: predecessors must be printable, non-whitespace characters")]
    InvalidSymbol(char),

    /// No rule exists for the given predecessor.
    #[error("no rule for predecessor {0:?}")]
    NotFound(char),

    /// A pop was interpreted with no saved turtle state on the stack.
    #[error("turtle stack underflow at symbol index {position}")]
    StackUnderflow { position: usize },

    /// Expanding an iteration would need more memory than can be allocated.
    #[error("resource exhaustion while producing iteration {iteration}: {requested} bytes requested")]
    ResourceExhaustion { iteration: usize, requested: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LSystemError>;
