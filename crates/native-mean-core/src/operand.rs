//! Parsing of textual operands.

use crate::error::OperandError;

/// Parse an operand as a double.
///
/// Accepts decimal and exponent notation as well as `Inf`, `-Inf` and `NaN`
/// in any letter case. Surrounding whitespace is ignored.
pub fn parse_operand(input: &str) -> Result<f64, OperandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(OperandError::Empty);
    }

    trimmed.parse::<f64>().map_err(|_| OperandError::NotANumber {
        input: input.to_string(),
    })
}
