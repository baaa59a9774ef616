//! Error types for dynamic dispatch.

use thiserror::Error;

/// Structured error types for dispatch and macro invocation.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A dispatch produced a different kind of outcome than the caller expected
    #[error("Unexpected dispatch outcome: expected {expected}, got {actual}")]
    UnexpectedOutcome {
        expected: &'static str,
        actual: &'static str,
    },

    /// `end` was called on a child builder that has already been closed
    #[error("Child builder for key '{key}' was already closed")]
    BuilderClosed { key: String },

    /// A condition was supplied to a name that does not classify as a
    /// conditional write
    #[error("Method '{name}' does not take a condition")]
    NotConditional { name: String },

    /// No macro is registered under the requested name
    #[error("Macro not found: {name}")]
    MacroNotFound { name: String },

    /// A macro body reported a failure of its own
    #[error("Macro '{name}' failed: {reason}")]
    MacroFailed { name: String, reason: String },
}

impl DispatchError {
    /// Convenience constructor for macro bodies reporting their own failures
    pub fn macro_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        DispatchError::MacroFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is an outcome shape mismatch
    pub fn is_unexpected_outcome(&self) -> bool {
        matches!(self, DispatchError::UnexpectedOutcome { .. })
    }

    /// Check if this error comes from a macro lookup or body
    pub fn is_macro_error(&self) -> bool {
        matches!(
            self,
            DispatchError::MacroNotFound { .. } | DispatchError::MacroFailed { .. }
        )
    }

    /// Check if this error is a condition passed to an unconditional name
    pub fn is_not_conditional(&self) -> bool {
        matches!(self, DispatchError::NotConditional { .. })
    }

    /// Check if this error is a repeated `end`
    pub fn is_builder_closed(&self) -> bool {
        matches!(self, DispatchError::BuilderClosed { .. })
    }
}

// Conversion from DispatchError to the main Error type
impl From<DispatchError> for crate::Error {
    fn from(err: DispatchError) -> Self {
        crate::Error::Dispatch(err)
    }
}
