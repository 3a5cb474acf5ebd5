// ABOUTME: Error types for lexing, reading, and evaluation failures

use thiserror::Error;

use crate::value::Value;

/// Why the lexer or reader rejected the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("malformed number literal: {0}")]
    MalformedNumber(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("expected ')', found {0}")]
    ExpectedCloseParen(String),

    #[error("malformed dotted pair")]
    MalformedDottedPair,

    #[error("unexpected trailing input after expression")]
    TrailingInput,

    #[error("unbalanced parentheses")]
    UnbalancedParens,
}

/// Arity error with function name, expected count/range, and actual count.
#[derive(Error, Debug, Clone)]
pub enum LispError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Type mismatch with function name, expected type, actual type, and position.
    #[error("{function}: expected {expected}, got {actual} at argument {position}")]
    TypeMismatch {
        function: String,
        expected: String,
        actual: String,
        position: usize,
    },

    #[error("{function}: expected {expected} argument{}, got {actual}", if *.expected == "1" { "" } else { "s" })]
    ArityError {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("{function}: {message}")]
    RuntimeError { function: String, message: String },

    #[error("unbound symbol: {0}")]
    UndefinedSymbol(String),

    #[error("value is not callable: {0}")]
    NotCallable(String),

    #[error("{0}")]
    UserError(String),
}

impl LispError {
    pub fn type_error(function: &str, expected: &str, actual: &Value, position: usize) -> Self {
        LispError::TypeMismatch {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
            position,
        }
    }

    pub fn arity(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        LispError::ArityError {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn runtime(function: &str, message: impl Into<String>) -> Self {
        LispError::RuntimeError {
            function: function.to_string(),
            message: message.into(),
        }
    }
}

pub const ARITY_ONE: &str = "1";
pub const ARITY_TWO: &str = "2";
pub const ARITY_ONE_OR_TWO: &str = "1-2";
pub const ARITY_ZERO_OR_ONE: &str = "0-1";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";
pub const ARITY_TWO_OR_THREE: &str = "2-3";
