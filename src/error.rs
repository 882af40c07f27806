//! Typed error kinds for the report pipeline.
//!
//! The pipeline distinguishes three failure classes: structurally broken
//! input lines, session records referencing a user that was never
//! introduced, and plain I/O failures. Any of them aborts the run before
//! the output file is finalized.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A line carried a recognized record prefix but fewer fields than the
    /// shape requires, or a non-integer where an integer is expected.
    #[error("malformed {shape} line: {reason}")]
    MalformedLine { shape: &'static str, reason: String },

    /// A session line arrived before the user line that introduces its id.
    #[error("session references unknown user id {user_id}")]
    UnknownUserReference { user_id: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub(crate) fn malformed(shape: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            shape,
            reason: reason.into(),
        }
    }
}
