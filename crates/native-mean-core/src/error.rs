//! Error types for the outer layers of the core.
//!
//! The mean itself never fails; only turning text into operands can.

use thiserror::Error;

/// Operand text could not be interpreted as a double.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// Nothing but whitespace was provided.
    #[error("operand is empty")]
    Empty,

    /// Text is not a number in any accepted spelling.
    #[error("operand '{input}' is not a number")]
    NotANumber {
        /// The rejected input, untrimmed
        input: String,
    },
}
