//! Two-phase program surface: parse once, evaluate as often as needed.
//!
//! [`Program::parse`] tokenizes a postfix source string up front, so
//! evaluation never re-scans text. [`Program::eval`] runs on a fresh
//! evaluator and requires the program to reduce to exactly one value;
//! [`Program::eval_on`] runs against a caller-owned evaluator whose
//! stack carries over between programs (the REPL uses this).

use crate::evaluator::{Evaluator, Status};
use crate::parser::{self, BinaryOp, ParseError, Span, Token, TokenKind};
use crate::{String, ToString, Vec};
use core::fmt;

/// A tokenized postfix program, ready to evaluate.
#[derive(Debug, Clone)]
pub struct Program {
    tokens: Vec<Token>,
    source: String,
}

/// Why a program failed, with enough context to render a source snippet.
#[derive(Debug, Clone)]
pub struct ProgramError {
    pub kind: ProgramErrorKind,
    /// Byte range of the offending token, when one exists.
    pub span: Option<Span>,
    /// The source text the program was parsed from.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgramErrorKind {
    /// A word that is neither an operator symbol nor a number.
    UnknownToken,
    /// The source contained no tokens at all.
    EmptyProgram,
    /// An operator latched an error status.
    Arithmetic { op: BinaryOp, status: Status },
    /// The program finished with more than one value on the stack.
    LeftoverOperands { depth: usize },
}

impl ProgramError {
    fn new(kind: ProgramErrorKind, span: Option<Span>, source: &str) -> Self {
        Self {
            kind,
            span,
            source: source.to_string(),
        }
    }
}

impl fmt::Display for ProgramErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramErrorKind::UnknownToken => write!(f, "unknown token"),
            ProgramErrorKind::EmptyProgram => write!(f, "empty program"),
            ProgramErrorKind::Arithmetic { op, status } => {
                write!(f, "operator `{}` failed: {}", op, status)
            }
            ProgramErrorKind::LeftoverOperands { depth } => {
                write!(f, "program left {} operands on the stack", depth)
            }
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(span) = &self.span {
            write!(f, " at {}..{}", span.0.start, span.0.end)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProgramError {}

impl Program {
    /// Tokenizes `source` into a program.
    ///
    /// Fails on an unknown word or on an entirely empty source.
    pub fn parse(source: &str) -> Result<Self, ProgramError> {
        let tokens = parser::tokenize(source).map_err(|e| match e {
            ParseError::UnknownToken { span } => {
                ProgramError::new(ProgramErrorKind::UnknownToken, Some(span), source)
            }
        })?;
        if tokens.is_empty() {
            return Err(ProgramError::new(
                ProgramErrorKind::EmptyProgram,
                None,
                source,
            ));
        }
        Ok(Self {
            tokens,
            source: source.to_string(),
        })
    }

    /// The source text this program was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the program on a fresh evaluator.
    ///
    /// The program must reduce the stack to exactly one value, which is
    /// returned.
    pub fn eval(&self) -> Result<f64, ProgramError> {
        let mut evaluator = Evaluator::new();
        let top = self.eval_on(&mut evaluator)?;
        let depth = evaluator.depth();
        if depth != 1 {
            return Err(ProgramError::new(
                ProgramErrorKind::LeftoverOperands { depth },
                None,
                &self.source,
            ));
        }
        Ok(top)
    }

    /// Evaluates the program on a caller-owned evaluator and returns the
    /// resulting top of the stack.
    ///
    /// Operands already on the evaluator's stack participate, and
    /// whatever the program leaves behind stays there for the next
    /// program. An operator that latches an error stops evaluation and
    /// reports it with the operator's source span; the evaluator keeps
    /// its post-failure stack.
    pub fn eval_on(&self, evaluator: &mut Evaluator) -> Result<f64, ProgramError> {
        for token in &self.tokens {
            match token.kind {
                TokenKind::Number(value) => evaluator.push(value),
                TokenKind::Operator(op) => {
                    evaluator.apply(op);
                    let status = evaluator.status();
                    if status.is_err() {
                        return Err(ProgramError::new(
                            ProgramErrorKind::Arithmetic { op, status },
                            Some(token.span.clone()),
                            &self.source,
                        ));
                    }
                }
            }
        }
        // A non-empty program whose last step succeeded always leaves at
        // least that step's result on the stack.
        Ok(evaluator
            .peek()
            .expect("successful program left an empty stack"))
    }
}

/// Parses and evaluates `source` in one call.
///
/// # Examples
///
/// ```ignore
/// use revpol_core::program::eval_str;
///
/// assert_eq!(eval_str("3 4 + 2 *").unwrap(), 14.0);
/// ```
pub fn eval_str(source: &str) -> Result<f64, ProgramError> {
    Program::parse(source)?.eval()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_number() {
        assert_eq!(eval_str("42").unwrap(), 42.0);
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(eval_str("3 4 +").unwrap(), 7.0);
        assert_eq!(eval_str("3 4 + 2 *").unwrap(), 14.0);
        assert_eq!(eval_str("10 2 /").unwrap(), 5.0);
    }

    #[test]
    fn test_operand_order() {
        assert_eq!(eval_str("10 4 -").unwrap(), 6.0);
        assert_eq!(eval_str("4 10 -").unwrap(), -6.0);
    }

    #[test]
    fn test_negative_literals() {
        assert_eq!(eval_str("-0.5 2 *").unwrap(), -1.0);
    }

    #[test]
    fn test_empty_program() {
        let err = Program::parse("   ").unwrap_err();
        assert_eq!(err.kind, ProgramErrorKind::EmptyProgram);
        assert_eq!(err.span, None);
    }

    #[test]
    fn test_unknown_token_has_span() {
        let err = Program::parse("1 2 bogus +").unwrap_err();
        assert_eq!(err.kind, ProgramErrorKind::UnknownToken);
        let span = err.span.unwrap();
        assert_eq!(span.str_of(&err.source), "bogus");
    }

    #[test]
    fn test_division_by_zero_reports_operator_span() {
        let err = eval_str("1 0 /").unwrap_err();
        assert_eq!(
            err.kind,
            ProgramErrorKind::Arithmetic {
                op: BinaryOp::Div,
                status: Status::DivisionByZero,
            }
        );
        assert_eq!(err.span.unwrap().str_of("1 0 /"), "/");
    }

    #[test]
    fn test_binary_error_on_short_stack() {
        let err = eval_str("5 +").unwrap_err();
        assert_eq!(
            err.kind,
            ProgramErrorKind::Arithmetic {
                op: BinaryOp::Add,
                status: Status::Binary,
            }
        );
    }

    #[test]
    fn test_leftover_operands() {
        let err = eval_str("1 2 3 +").unwrap_err();
        assert_eq!(err.kind, ProgramErrorKind::LeftoverOperands { depth: 2 });
    }

    #[test]
    fn test_eval_on_keeps_stack_between_programs() {
        let mut evaluator = Evaluator::new();

        let top = Program::parse("3 4")
            .unwrap()
            .eval_on(&mut evaluator)
            .unwrap();
        assert_eq!(top, 4.0);
        assert_eq!(evaluator.depth(), 2);

        let top = Program::parse("+").unwrap().eval_on(&mut evaluator).unwrap();
        assert_eq!(top, 7.0);
        assert_eq!(evaluator.depth(), 1);
    }

    #[test]
    fn test_eval_on_failure_keeps_post_failure_stack() {
        let mut evaluator = Evaluator::new();
        let err = Program::parse("8 2 0 / 5")
            .unwrap()
            .eval_on(&mut evaluator)
            .unwrap_err();
        assert!(matches!(err.kind, ProgramErrorKind::Arithmetic { .. }));
        // Evaluation stopped at the failing operator; the trailing 5 was
        // never pushed and the div consumed its operands.
        assert_eq!(evaluator.operands(), &[8.0]);
        assert_eq!(evaluator.status(), Status::DivisionByZero);
    }

    #[test]
    fn test_error_display() {
        let err = eval_str("1 0 /").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("division by zero"));
        assert!(msg.contains("4..5"));
    }
}
