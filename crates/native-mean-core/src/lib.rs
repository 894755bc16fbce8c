//! # Native Mean Core
//!
//! The mean-of-two function exported to the host environment, together with
//! the reference vector mean it is benchmarked against.

pub mod error;
pub mod implementation;
pub mod mean;
pub mod operand;
pub mod reference;

pub use error::OperandError;
pub use implementation::MeanImpl;
pub use mean::{Average, mean};
pub use operand::parse_operand;
pub use reference::reference_mean;
