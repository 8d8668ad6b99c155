//! Code emission errors.

use godot_entry_core::GenerationError;
use thiserror::Error;

/// Errors raised while building or rendering Kotlin code.
///
/// These always point at a bug in the caller: a format string and its
/// argument list that do not agree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A placeholder with no argument left to consume.
    #[error("format \"{format}\" has no argument for placeholder #{index}")]
    MissingArgument { format: String, index: usize },

    /// More arguments than placeholders.
    #[error("format \"{format}\" has {unused} unused argument(s)")]
    UnusedArguments { format: String, unused: usize },

    /// An argument of the wrong kind for its placeholder.
    #[error("format \"{format}\": placeholder %{placeholder} cannot take argument #{index} ({found})")]
    WrongArgumentKind {
        format: String,
        placeholder: char,
        index: usize,
        found: &'static str,
    },

    /// `%` followed by an unknown character, or a trailing `%`.
    #[error("format \"{format}\" contains an invalid placeholder at byte {position}")]
    InvalidPlaceholder { format: String, position: usize },

    /// `end_control_flow` without a matching `begin_control_flow`.
    #[error("function {function} closes more control flows than it opens")]
    UnbalancedControlFlow { function: String },
}

impl From<EmitError> for GenerationError {
    fn from(err: EmitError) -> Self {
        GenerationError::Emit(Box::new(err))
    }
}
