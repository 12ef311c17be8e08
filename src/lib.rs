//! Revpol - a reverse-Polish-notation calculator library
//!
//! # Overview
//!
//! Revpol evaluates postfix arithmetic over IEEE 754 doubles. The core
//! is a value-stack machine with a latched status register: operands go
//! on the stack, binary operators consume the top two, and the outcome
//! of the most recent operation is read back from the latch instead of
//! being returned step by step.
//!
//! # Quick Start
//!
//! ```ignore
//! use revpol::{Evaluator, Status};
//!
//! let mut eval = Evaluator::new();
//! eval.push(12.0);
//! eval.push(4.0);
//! eval.div();
//! assert_eq!(eval.status(), Status::Ok);
//! assert_eq!(eval.pop(), 3.0);
//! ```
//!
//! # Program Surface
//!
//! Text programs go through a two-phase parse/eval split:
//!
//! ```ignore
//! use revpol::{Program, eval_str};
//!
//! assert_eq!(eval_str("3 4 + 2 *").unwrap(), 14.0);
//!
//! let program = Program::parse("10 2 /").unwrap();
//! assert_eq!(program.eval().unwrap(), 5.0);
//! ```
//!
//! Failed programs carry the offending source span; [`render_error`]
//! prints them with an annotated snippet.

// Re-export public API from revpol_core
pub use revpol_core::{
    BinaryOp, Evaluator, EvaluatorOptions, Program, ProgramError, ProgramErrorKind, Span, Status,
    eval_str,
};

// Re-export the stack for callers embedding their own machines
pub use revpol_core::stack::Stack;

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
