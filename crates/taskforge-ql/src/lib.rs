//! Query language for filtering taskforge task lists.
//!
//! This crate is the front end of the task query language: a lexer, a
//! Pratt parser, and the AST both evaluation back ends consume. Evaluation
//! itself lives with the task list implementations (see the
//! `taskforge-list-rs` crate), which turn one parsed [`Ast`] into either an
//! in-memory predicate or a structured filter document.
//!
//! # Supported Syntax
//!
//! ## Comparisons
//! - `field = value`, `field != value`
//! - `field > value`, `field >= value`, `field < value`, `field <= value`
//! - `field ~ value` (substring match, `^` is a synonym)
//! - `field !~ value` (negated substring match, `^~` is a synonym)
//!
//! ## Connectives and Grouping
//! - `and` / `AND`, `or` / `OR`
//! - `( … )`
//!
//! ## Literals
//! - Barewords and `"quoted strings"`
//! - Numbers (`5`, `2.5`)
//! - Dates (`2018-01-02`, optionally with a time in 24-hour or AM/PM form)
//! - Booleans (`true` / `false`, any case)
//!
//! ## Free Text
//! A bare word or quoted phrase with no field/operator is a free-text
//! term, matched against a task's title and body. Adjacent terms merge
//! into one phrase, and a leading `-` escapes a keyword so `milk -and
//! cookies` searches for the literal phrase "milk and cookies".
//!
//! # Example
//!
//! ```
//! use taskforge_ql_rs::parse;
//!
//! let ast = parse("priority > 5 and title ~ \"trash\"").unwrap();
//! assert_eq!(ast.to_string(), "((priority > 5) AND (title ~ trash))");
//!
//! // Malformed queries return the accumulated diagnostics instead.
//! assert!(parse("priority >").is_err());
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Ast, BooleanLiteral, DateLiteral, Expr, InfixExpr, NumberLiteral, StringLiteral};
pub use error::{ParseError, ParseErrorKind, ParseErrors};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// Parses a query string, returning the AST or every diagnostic found.
///
/// This is the front door for callers that evaluate queries: a non-empty
/// error suppresses evaluation entirely, which the `Result` makes
/// structural. An empty input is `Ok` with no expression.
pub fn parse(input: &str) -> Result<Ast, ParseErrors> {
    let mut parser = Parser::new(Lexer::new(input));
    let ast = parser.parse();
    match parser.error() {
        Some(errors) => Err(errors),
        None => Ok(ast),
    }
}
