//! Error types for the query parser.

use std::fmt;

use thiserror::Error;

use crate::token::TokenKind;

/// The specific problem behind a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The input ended where an operand was expected.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A peek-expectation was not met, e.g. a missing `)`.
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        /// The token kind the parser required.
        expected: TokenKind,
        /// The token kind it found instead.
        found: TokenKind,
    },

    /// A token with no prefix handler appeared in operand position.
    #[error("{found} not allowed at the start of an expression")]
    UnexpectedPrefix {
        /// The offending token kind.
        found: TokenKind,
    },

    /// A number literal that does not parse as a float.
    #[error("could not parse number: {literal}")]
    InvalidNumber {
        /// The offending literal text.
        literal: String,
    },

    /// A date literal matching none of the supported formats.
    #[error("not a valid date format: {literal}")]
    InvalidDate {
        /// The offending literal text.
        literal: String,
    },

    /// The left side of a comparison was not a field name.
    #[error("left side of a comparison must be a field name")]
    InvalidComparisonOperand,

    /// An `AND`/`OR` operand was neither a comparison nor a string literal.
    #[error("logic operators (AND / OR) must combine comparisons or string literals")]
    InvalidLogicOperand,

    /// A quoted string with no closing quote, deferred from the lexer.
    #[error("unterminated quoted string")]
    UnterminatedString,

    /// A character the lexer could not tokenize, deferred from the lexer.
    #[error("unrecognized character {character:?}")]
    IllegalCharacter {
        /// The character that could not be tokenized.
        character: char,
    },
}

/// A single diagnostic produced during parsing, with positional context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (at position {position}, near {character:?})")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// The character under the lexer cursor when the error was recorded.
    pub character: char,
    /// The cursor position (byte offset) when the error was recorded.
    pub position: usize,
}

/// All diagnostics accumulated over one parse.
///
/// The parser does not stop at the first problem where structurally
/// possible, so several diagnostics can be reported in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    /// The diagnostics, in the order they were recorded.
    pub errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true when there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parsing errors: ")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            err.fmt(f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
