//! Tokenizer for postfix programs.
//!
//! A program is a flat, whitespace-separated sequence of words. Each word
//! is either an operator symbol (`+`, `-`, `*`, `/`) or a number in any
//! form `f64::from_str` accepts. Operator symbols are matched before
//! numbers, so a bare `-` is subtraction while `-0.5` is a literal.

use crate::Vec;
use core::fmt;
use core::ops::Range;

/// Byte range of a token in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
    pub fn combine(a: &Span, b: &Span) -> Span {
        Span::new(a.0.start, b.0.end)
    }
    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Maps an operator word to its operator, or `None` if the word is
    /// not an operator symbol.
    pub fn from_symbol(word: &str) -> Option<Self> {
        match word {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    /// The source symbol for this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What a single token means.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Operator(BinaryOp),
}

/// A token together with its location in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenization failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A word that is neither an operator symbol nor a number.
    UnknownToken { span: Span },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownToken { span } => {
                write!(f, "Unknown token at {}..{}", span.0.start, span.0.end)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Splits `source` into tokens.
///
/// Words are separated by any Unicode whitespace. Returns an error for
/// the first word that is neither an operator symbol nor a number.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        let span = Span::new(start, end);
        let word = span.str_of(source);
        let kind = match BinaryOp::from_symbol(word) {
            Some(op) => TokenKind::Operator(op),
            None => match word.parse::<f64>() {
                Ok(value) => TokenKind::Number(value),
                Err(_) => return Err(ParseError::UnknownToken { span }),
            },
        };
        tokens.push(Token { kind, span });
    }

    Ok(tokens)
}
