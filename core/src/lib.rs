#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod evaluator;
pub mod parser;
pub mod program;
pub mod stack;

pub use evaluator::{Evaluator, EvaluatorOptions, Status};
pub use parser::{BinaryOp, Span, Token, TokenKind};
pub use program::{Program, ProgramError, ProgramErrorKind, eval_str};
pub use stack::Stack;
