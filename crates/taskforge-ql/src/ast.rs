//! Abstract syntax tree for parsed queries.

use std::fmt;

use chrono::NaiveDateTime;

use crate::token::Token;

/// The parsed representation of one query.
///
/// The expression is `None` when the parser could not build anything at
/// all; callers must check [`Parser::error`](crate::parser::Parser::error)
/// before evaluating either way, since a partially built tree may
/// accompany diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    /// The root expression, if one could be built.
    pub expression: Option<Expr>,
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            Some(expr) => expr.fmt(f),
            None => Ok(()),
        }
    }
}

/// A query expression node.
///
/// This is a closed sum type: evaluators match exhaustively on it, so an
/// unhandled node shape is a compile-time error rather than a runtime
/// type-assertion failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A binary operation: a comparison or a logical connective.
    Infix(InfixExpr),
    /// A bareword, quoted phrase, or merged free-text run.
    String(StringLiteral),
    /// A numeric literal.
    Number(NumberLiteral),
    /// A `true`/`false` literal.
    Boolean(BooleanLiteral),
    /// A date literal.
    Date(DateLiteral),
}

impl Expr {
    /// Creates an infix node from an operator token and two operands.
    pub fn infix(operator: Token, left: Expr, right: Expr) -> Self {
        Expr::Infix(InfixExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Returns the string literal's value when this node names a field.
    pub fn as_field_name(&self) -> Option<&str> {
        match self {
            Expr::String(lit) => Some(&lit.value),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Infix(infix) => write!(
                f,
                "({} {} {})",
                infix.left, infix.operator.kind, infix.right
            ),
            Expr::String(lit) => f.write_str(&lit.value),
            Expr::Number(lit) => write!(f, "{}", lit.value),
            Expr::Boolean(lit) => write!(f, "{}", lit.value),
            Expr::Date(lit) => write!(f, "{}", lit.value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// A binary operation with a left and right operand.
///
/// For comparison operators the parser guarantees the left side is a
/// [`StringLiteral`] naming a task field; for `AND`/`OR` both sides are
/// comparisons, nested connectives, or free-text string literals.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    /// The operator token (comparison or connective).
    pub operator: Token,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// A string literal: a field name, a quoted value, or a free-text term.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// The source token backing this literal.
    pub token: Token,
    pub value: String,
}

/// A numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub token: Token,
    pub value: f64,
}

/// A boolean literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

/// A date literal. Queries carry no timezone syntax, so dates are naive.
#[derive(Debug, Clone, PartialEq)]
pub struct DateLiteral {
    pub token: Token,
    pub value: NaiveDateTime,
}
