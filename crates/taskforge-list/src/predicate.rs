//! In-memory predicate compiler: the query evaluation backend for
//! memory-resident task lists.
//!
//! [`compile`] lowers an [`Ast`] into a tree of boxed closures over a
//! single [`Task`]. Field names and literal types are checked while
//! compiling: an unknown field, or a literal whose type does not match the
//! field's (say `priority ~ "high"`), lowers to a predicate that matches
//! nothing rather than an error. The negated operators (`!=`, `!~`, and
//! `<`) are built by inverting their positive counterparts, so under them
//! the same cases match everything instead: `due_date != 5` matches every
//! task.
//!
//! One defined oddity carried over from the language: `<` is the negation
//! of `>`, so `priority < 5` also matches `priority = 5`. `<=` is an
//! ordinary inclusive comparison. The document backend emits the store's
//! strict `$lt` instead; see the `document` module for the enumerated
//! divergences.

use taskforge_ql_rs::{Ast, Expr, InfixExpr, TokenKind};

use crate::field::Field;
use crate::task::Task;

/// A compiled query: a boolean test over one task.
pub type Predicate = Box<dyn Fn(&Task) -> bool + Send + Sync>;

/// Compiles a parsed query into a predicate.
///
/// An empty AST (no expression) matches nothing. The caller is expected to
/// have checked the parser's error state; compiling a tree that came with
/// diagnostics is a caller bug, though it still cannot panic.
pub fn compile(ast: &Ast) -> Predicate {
    match &ast.expression {
        Some(expr) => compile_expr(expr),
        None => never(),
    }
}

fn compile_expr(expr: &Expr) -> Predicate {
    match expr {
        Expr::Infix(infix) => compile_infix(infix),
        // A bare string is a free-text term over title and body.
        Expr::String(lit) => {
            let text = lit.value.clone();
            Box::new(move |task| task.title.contains(&text) || task.body.contains(&text))
        }
        // A bare number, date, or boolean is not a query.
        Expr::Number(_) | Expr::Boolean(_) | Expr::Date(_) => never(),
    }
}

fn compile_infix(infix: &InfixExpr) -> Predicate {
    match infix.operator.kind {
        TokenKind::And => {
            let left = compile_expr(&infix.left);
            let right = compile_expr(&infix.right);
            Box::new(move |task| left(task) && right(task))
        }
        TokenKind::Or => {
            let left = compile_expr(&infix.left);
            let right = compile_expr(&infix.right);
            Box::new(move |task| left(task) || right(task))
        }
        TokenKind::Like => like(infix),
        TokenKind::NotLike => not(like(infix)),
        TokenKind::Eq => eq(infix),
        TokenKind::Ne => not(eq(infix)),
        TokenKind::Gt => gt(infix),
        TokenKind::Gte => gte(infix),
        // `<` is defined as "not >" and therefore admits the equal case.
        TokenKind::Lt => not(gt(infix)),
        TokenKind::Lte => lte(infix),
        _ => never(),
    }
}

fn field_of(expr: &Expr) -> Option<Field> {
    expr.as_field_name().and_then(Field::lookup)
}

fn eq(infix: &InfixExpr) -> Predicate {
    let Some(field) = field_of(&infix.left) else {
        return never();
    };

    match (field, infix.right.as_ref()) {
        (Field::Title | Field::Body | Field::Context, Expr::String(lit)) => {
            let value = lit.value.clone();
            Box::new(move |task| field.text(task) == Some(value.as_str()))
        }
        (Field::Priority, Expr::Number(lit)) => {
            let value = lit.value;
            Box::new(move |task| task.priority == value)
        }
        (Field::CreatedDate | Field::CompletedDate, Expr::Date(lit)) => {
            let value = lit.value;
            Box::new(move |task| field.date(task) == Some(value))
        }
        (Field::Completed, Expr::Boolean(lit)) => {
            let value = lit.value;
            Box::new(move |task| task.is_completed() == value)
        }
        _ => never(),
    }
}

fn gt(infix: &InfixExpr) -> Predicate {
    ordered(infix, |ord| ord == std::cmp::Ordering::Greater)
}

fn gte(infix: &InfixExpr) -> Predicate {
    ordered(infix, |ord| ord != std::cmp::Ordering::Less)
}

fn lte(infix: &InfixExpr) -> Predicate {
    ordered(infix, |ord| ord != std::cmp::Ordering::Greater)
}

/// Builds an ordering comparison over the numeric and date fields.
/// Comparing against an unset timestamp never matches.
fn ordered(
    infix: &InfixExpr,
    accept: impl Fn(std::cmp::Ordering) -> bool + Send + Sync + 'static,
) -> Predicate {
    let Some(field) = field_of(&infix.left) else {
        return never();
    };

    match (field, infix.right.as_ref()) {
        (Field::Priority, Expr::Number(lit)) => {
            let value = lit.value;
            Box::new(move |task| {
                task.priority
                    .partial_cmp(&value)
                    .is_some_and(|ord| accept(ord))
            })
        }
        (Field::CreatedDate | Field::CompletedDate, Expr::Date(lit)) => {
            let value = lit.value;
            Box::new(move |task| field.date(task).is_some_and(|date| accept(date.cmp(&value))))
        }
        _ => never(),
    }
}

fn like(infix: &InfixExpr) -> Predicate {
    let Some(field) = field_of(&infix.left) else {
        return never();
    };

    match (field, infix.right.as_ref()) {
        (Field::Title | Field::Body | Field::Context, Expr::String(lit)) => {
            let value = lit.value.clone();
            Box::new(move |task| {
                field
                    .text(task)
                    .is_some_and(|text| text.contains(value.as_str()))
            })
        }
        _ => never(),
    }
}

fn not(inner: Predicate) -> Predicate {
    Box::new(move |task| !inner(task))
}

fn never() -> Predicate {
    Box::new(|_| false)
}
