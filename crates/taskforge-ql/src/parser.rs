//! Operator-precedence (Pratt) parser for query expressions.

use chrono::{NaiveDate, NaiveDateTime};

use crate::ast::{Ast, BooleanLiteral, DateLiteral, Expr, NumberLiteral, StringLiteral};
use crate::error::{ParseError, ParseErrorKind, ParseErrors};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Operator binding strength, lowest to highest.
///
/// Free-text concatenation binds weakest so that `milk and cookies` groups
/// around the connective, `AND`/`OR` bind tighter than free text, and
/// comparisons bind tightest so `priority > 5 and title ~ "trash"` reads as
/// `(priority > 5) AND (title ~ trash)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    /// Adjacent free-text terms merging into one literal.
    Text,
    /// `AND` / `OR`.
    AndOr,
    /// The eight comparison operators.
    Comparison,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    if kind.is_comparison() {
        return Precedence::Comparison;
    }
    match kind {
        TokenKind::And | TokenKind::Or => Precedence::AndOr,
        TokenKind::String => Precedence::Text,
        _ => Precedence::Lowest,
    }
}

/// Accepted date literal formats, tried in order. Date-only literals parse
/// to midnight.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %I:%M:%S%p",
    "%Y-%m-%d %I:%M%p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a date literal, trying each supported format in order.
///
/// Returns `None` when no format matches. Date-only literals resolve to
/// midnight.
pub fn parse_date_literal(literal: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(literal, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(literal, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parser for query expressions.
///
/// [`Parser::parse`] always returns an [`Ast`] and never panics; problems
/// accumulate as diagnostics instead, exposed through [`Parser::error`].
/// An `Ast` produced alongside diagnostics may be partial and must not be
/// evaluated. The parser keeps going after an error where structurally
/// possible so one pass can surface several problems.
///
/// # Example
///
/// ```
/// use taskforge_ql_rs::lexer::Lexer;
/// use taskforge_ql_rs::parser::Parser;
///
/// let mut parser = Parser::new(Lexer::new("priority > 5"));
/// let ast = parser.parse();
/// assert!(parser.error().is_none());
/// assert_eq!(ast.to_string(), "(priority > 5)");
/// ```
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    errors: Vec<ParseError>,
    cur: Token,
    peek: Token,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut parser = Parser {
            lexer,
            errors: Vec::new(),
            cur: Token::eof(),
            peek: Token::eof(),
        };
        // Prime cur and peek.
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Parses the query into an [`Ast`].
    ///
    /// An empty input yields an `Ast` with no expression and no error,
    /// which is how callers distinguish an empty query from a malformed
    /// one.
    pub fn parse(&mut self) -> Ast {
        if self.cur.kind == TokenKind::Eof {
            return Ast { expression: None };
        }
        Ast {
            expression: self.parse_expression(Precedence::Lowest),
        }
    }

    /// Returns all diagnostics accumulated so far.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns the aggregate error, or `None` if parsing succeeded.
    pub fn error(&self) -> Option<ParseErrors> {
        if self.errors.is_empty() {
            None
        } else {
            Some(ParseErrors {
                errors: self.errors.clone(),
            })
        }
    }

    fn next_token(&mut self) {
        self.cur = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn add_error(&mut self, kind: ParseErrorKind) {
        self.errors.push(ParseError {
            kind,
            character: self.lexer.current_char(),
            position: self.lexer.position(),
        });
    }

    /// Advances when the peek token matches, otherwise records a
    /// peek-expectation diagnostic.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.next_token();
            true
        } else {
            self.add_error(ParseErrorKind::UnexpectedToken {
                expected: kind,
                found: self.peek.kind,
            });
            false
        }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        if self.cur.kind == TokenKind::Eof {
            self.add_error(ParseErrorKind::UnexpectedEndOfInput);
            return None;
        }

        let mut left = self.parse_prefix()?;

        while self.peek.kind != TokenKind::Eof && precedence < precedence_of(self.peek.kind) {
            match self.peek.kind {
                kind if kind.is_comparison() => {
                    self.next_token();
                    left = self.parse_comparison(left)?;
                }
                TokenKind::And | TokenKind::Or => {
                    self.next_token();
                    left = self.parse_logic(left)?;
                }
                TokenKind::String => {
                    self.next_token();
                    left = self.concat(left);
                }
                _ => break,
            }
        }

        Some(left)
    }

    /// Dispatches on the token in operand (prefix) position.
    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.cur.kind {
            TokenKind::String => Some(Expr::String(StringLiteral {
                token: self.cur.clone(),
                value: self.cur.literal.clone(),
            })),
            TokenKind::Number => self.parse_number(),
            TokenKind::Date => self.parse_date(),
            TokenKind::Boolean => Some(Expr::Boolean(BooleanLiteral {
                token: self.cur.clone(),
                value: self.cur.literal.eq_ignore_ascii_case("true"),
            })),
            TokenKind::OpenParen => self.parse_grouped(),
            // Lexical errors are deferred to this point so they surface as
            // ordinary diagnostics.
            TokenKind::Unexpected => {
                self.add_error(ParseErrorKind::UnterminatedString);
                None
            }
            TokenKind::Illegal => {
                let character = self.cur.literal.chars().next().unwrap_or('\0');
                self.add_error(ParseErrorKind::IllegalCharacter { character });
                None
            }
            kind => {
                self.add_error(ParseErrorKind::UnexpectedPrefix { found: kind });
                None
            }
        }
    }

    fn parse_number(&mut self) -> Option<Expr> {
        match self.cur.literal.parse::<f64>() {
            Ok(value) => Some(Expr::Number(NumberLiteral {
                token: self.cur.clone(),
                value,
            })),
            Err(_) => {
                self.add_error(ParseErrorKind::InvalidNumber {
                    literal: self.cur.literal.clone(),
                });
                None
            }
        }
    }

    fn parse_date(&mut self) -> Option<Expr> {
        match parse_date_literal(&self.cur.literal) {
            Some(value) => Some(Expr::Date(DateLiteral {
                token: self.cur.clone(),
                value,
            })),
            None => {
                self.add_error(ParseErrorKind::InvalidDate {
                    literal: self.cur.literal.clone(),
                });
                None
            }
        }
    }

    fn parse_grouped(&mut self) -> Option<Expr> {
        self.next_token();

        let expr = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenKind::CloseParen) {
            return None;
        }

        expr
    }

    /// Builds a comparison node. The left operand must be a string literal
    /// naming a task field; this is reported but the node is still built so
    /// parsing can continue.
    fn parse_comparison(&mut self, left: Expr) -> Option<Expr> {
        let operator = self.cur.clone();

        if left.as_field_name().is_none() {
            self.add_error(ParseErrorKind::InvalidComparisonOperand);
        }

        let precedence = precedence_of(operator.kind);
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expr::infix(operator, left, right))
    }

    /// Builds an `AND`/`OR` node. Both operands must be comparisons,
    /// nested connectives, or free-text string literals.
    fn parse_logic(&mut self, left: Expr) -> Option<Expr> {
        let operator = self.cur.clone();

        if !is_logic_operand(&left) {
            self.add_error(ParseErrorKind::InvalidLogicOperand);
            return None;
        }

        let precedence = precedence_of(operator.kind);
        self.next_token();
        let right = self.parse_expression(precedence)?;

        if !is_logic_operand(&right) {
            self.add_error(ParseErrorKind::InvalidLogicOperand);
            return None;
        }

        Some(Expr::infix(operator, left, right))
    }

    /// Merges an adjacent bare string into an existing free-text literal,
    /// joined with a single space.
    fn concat(&mut self, left: Expr) -> Expr {
        match left {
            Expr::String(mut lit) => {
                lit.value.push(' ');
                lit.value.push_str(&self.cur.literal);
                lit.token.literal.push(' ');
                lit.token.literal.push_str(&self.cur.literal);
                Expr::String(lit)
            }
            other => other,
        }
    }
}

fn is_logic_operand(expr: &Expr) -> bool {
    matches!(expr, Expr::String(_) | Expr::Infix(_))
}
