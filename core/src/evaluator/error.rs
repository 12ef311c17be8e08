//! The evaluator's latched status register.

use core::fmt;

/// Outcome of the most recent fallible evaluator operation.
///
/// Every operation that can fail overwrites the latch, including on
/// success. Reading the latch never modifies it, and nothing clears it
/// implicitly; each evaluator instance carries its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// The last operation completed normally.
    #[default]
    Ok,
    /// A binary operator was applied with fewer than two operands.
    Binary,
    /// A division had a zero divisor.
    DivisionByZero,
    /// An operation produced a non-finite result.
    Overflow,
}

impl Status {
    /// `true` if the last operation completed normally.
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    /// `true` if the last operation latched an error.
    #[inline]
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "ok"),
            Status::Binary => write!(f, "binary operator needs two operands"),
            Status::DivisionByZero => write!(f, "division by zero"),
            Status::Overflow => write!(f, "arithmetic overflow"),
        }
    }
}
